mod mocks;
mod escalation_tests;
mod retry_tests;
