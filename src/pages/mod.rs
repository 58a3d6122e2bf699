pub mod backtest;
pub mod home;
pub mod not_found;
