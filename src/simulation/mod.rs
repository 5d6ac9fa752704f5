pub mod random_portfolio;
