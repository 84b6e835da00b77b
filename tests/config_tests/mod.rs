mod cli_test;
mod loader_test;
mod tracker_config_test;
