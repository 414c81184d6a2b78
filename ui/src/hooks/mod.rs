pub mod use_escrow_action;
