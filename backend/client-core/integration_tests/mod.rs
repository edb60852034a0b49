mod config;
mod dispatch;
mod editor;
mod ipc;
mod judge;
mod manifest;
mod relay;
mod support;
