mod judge_report;
mod message;
mod problem;
