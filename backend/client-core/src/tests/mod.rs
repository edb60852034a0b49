mod config;
mod debug_log;
mod editor;
mod framing;
mod judge_report;
mod manifest;
mod problem_file;
mod solution;
