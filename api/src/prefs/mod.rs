pub mod escrow_prefs;
pub mod user_prefs;
