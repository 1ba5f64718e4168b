#[path = "integration/scenarios.rs"]
mod scenarios;

#[path = "integration/full_loop.rs"]
mod full_loop;
