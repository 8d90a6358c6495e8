//! Unit tests for individual components, run as one integration binary.

mod unit;
