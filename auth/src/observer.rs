use std::time::Duration;

/// Steps of a login attempt, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStage {
    Validation,
    Lookup,
    PasswordCheck,
    TokenIssue,
}

impl LoginStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoginStage::Validation => "validation",
            LoginStage::Lookup => "lookup",
            LoginStage::PasswordCheck => "password_check",
            LoginStage::TokenIssue => "token_issue",
        }
    }
}

/// Receives the duration of each completed login stage.
///
/// Passed explicitly into a single call; stages that never run (e.g. after a
/// validation failure) are not reported.
pub trait LoginObserver: Send {
    fn stage_completed(&mut self, stage: LoginStage, elapsed: Duration);
}

/// Observer that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl LoginObserver for NoopObserver {
    fn stage_completed(&mut self, _stage: LoginStage, _elapsed: Duration) {}
}

/// Collects stage durations for later logging.
#[derive(Debug, Default, Clone)]
pub struct StageTimings {
    stages: Vec<(LoginStage, Duration)>,
}

impl StageTimings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, stage: LoginStage) -> Option<Duration> {
        self.stages
            .iter()
            .find(|(recorded, _)| *recorded == stage)
            .map(|(_, elapsed)| *elapsed)
    }

    pub fn stages(&self) -> &[(LoginStage, Duration)] {
        &self.stages
    }

    pub fn total(&self) -> Duration {
        self.stages.iter().map(|(_, elapsed)| *elapsed).sum()
    }
}

impl LoginObserver for StageTimings {
    fn stage_completed(&mut self, stage: LoginStage, elapsed: Duration) {
        self.stages.push((stage, elapsed));
    }
}
