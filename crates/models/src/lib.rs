pub mod errors;
pub mod db;
pub mod app_user;
pub mod food_item;
pub mod demo_login;

#[cfg(test)]
mod tests;
