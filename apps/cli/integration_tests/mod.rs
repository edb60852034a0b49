mod config;
mod host_process;
mod judge;
mod send;
mod setup;
