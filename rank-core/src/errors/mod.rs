pub mod rank_error;
