pub mod errors;
pub mod db;
pub mod site_view;
pub mod app_entry;
pub mod site_setting;

#[cfg(test)]
mod tests;
