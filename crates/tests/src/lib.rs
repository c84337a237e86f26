#[cfg(test)]
mod common;

#[cfg(test)]
mod search_tests;

#[cfg(test)]
mod details_tests;

#[cfg(test)]
mod rate_limit_tests;

#[cfg(test)]
mod cors_tests;

#[cfg(test)]
mod health_tests;
