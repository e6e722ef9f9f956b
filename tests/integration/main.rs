//! Integration tests for termreplay

mod helpers;

mod cli_test;
mod replay_test;
