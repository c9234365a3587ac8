pub mod check;
pub mod detail;
pub mod listing;
pub mod review;
pub mod stage1_signals;
pub mod stage2_score;
pub mod stage3_report;
