//! Client-side state for the contribution form.
//!
//! The controller keeps the last record the backend handed out next to the
//! user's uncommitted edits. Rendering goes through [`FormView`] and network
//! access through [`ContributionApi`], so the whole flow runs without a page.

use crate::client::{ClientError, ContributionApi};
use crate::controls::{
    InputBounds, SaveState, Status, StatusKind, bounds_for, default_value_for, describe_contribution,
    format_value,
};
use crate::models::{Contribution, ContributionRecord, ContributionType};
use crate::projection::{compute_future_impact, format_currency};
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, error, info};

pub const SUCCESS_STATUS_TTL: Duration = Duration::from_secs(3);

pub const LOAD_ERROR_TEXT: &str = "Error loading data.";
pub const SAVE_ERROR_TEXT: &str = "Error saving data.";
pub const SAVE_SUCCESS_TEXT: &str = "Changes saved successfully!";

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("no contribution record has been loaded")]
    NotLoaded,

    #[error("contribution value '{0}' is not a number")]
    InvalidValue(String),

    #[error(transparent)]
    Client(#[from] ClientError),
}

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("failed to load contribution: {0}")]
    Load(#[source] ClientError),

    #[error("failed to save contribution: {0}")]
    Save(#[source] SaveError),
}

/// Which control an edit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    Slider,
    Input,
}

/// Everything the page shows, recomputed on every render.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSnapshot {
    pub loaded: bool,
    pub ytd_contributions: String,
    pub current_contribution: String,
    pub contribution_type: ContributionType,
    pub slider_value: String,
    pub input_value: String,
    pub bounds: InputBounds,
    pub future_impact: String,
    pub save_enabled: bool,
    pub save_label: &'static str,
    pub status: Status,
}

pub trait FormView {
    fn render(&mut self, snapshot: &FormSnapshot);
}

#[derive(Debug, Clone, PartialEq)]
struct WorkingState {
    contribution_type: ContributionType,
    slider: String,
    input: String,
}

impl WorkingState {
    fn from_contribution(contribution: Contribution) -> Self {
        let text = format_value(contribution.value);
        Self {
            contribution_type: contribution.contribution_type,
            slider: text.clone(),
            input: text,
        }
    }

    fn set_value(&mut self, raw: &str) {
        self.slider = raw.to_string();
        self.input = raw.to_string();
    }

    fn parsed_value(&self) -> Option<f64> {
        self.input
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
    }
}

pub struct ContributionController<A, V> {
    api: A,
    view: V,
    record: Option<ContributionRecord>,
    working: WorkingState,
    save_state: SaveState,
    status: Status,
    status_deadline: Option<Instant>,
}

impl<A, V> ContributionController<A, V>
where
    A: ContributionApi,
    V: FormView,
{
    pub fn new(api: A, view: V) -> Self {
        let contribution_type = ContributionType::Percent;
        Self {
            api,
            view,
            record: None,
            working: WorkingState::from_contribution(Contribution::new(
                contribution_type,
                default_value_for(contribution_type),
            )),
            save_state: SaveState::Idle,
            status: Status::default(),
            status_deadline: None,
        }
    }

    pub async fn load(&mut self) -> Result<(), ControllerError> {
        match self.api.fetch().await {
            Ok(record) => {
                info!(
                    contribution_type = %record.contribution_type,
                    value = record.contribution_value,
                    "loaded contribution"
                );
                self.adopt(record);
                self.render();
                Ok(())
            }
            Err(err) => {
                error!("error loading data: {err}");
                self.set_status(Status::error(LOAD_ERROR_TEXT), None);
                self.render();
                Err(ControllerError::Load(err))
            }
        }
    }

    pub fn on_type_change(&mut self, selected: ContributionType) {
        debug!(%selected, "contribution type changed");
        self.working.contribution_type = selected;
        self.working.set_value(&format_value(default_value_for(selected)));
        self.render();
    }

    pub fn on_value_change(&mut self, source: ValueSource, raw_value: &str) {
        debug!(?source, raw_value, "contribution value changed");
        self.working.set_value(raw_value);
        self.render();
    }

    pub async fn save(&mut self) -> Result<(), ControllerError> {
        let payload = match self.build_payload() {
            Ok(payload) => payload,
            Err(err) => return Err(self.fail_save(err)),
        };

        self.save_state = SaveState::Saving;
        self.render();

        let result = self.api.save(&payload).await;
        self.save_state = SaveState::Idle;

        match result {
            Ok(record) => {
                info!(
                    contribution_type = %record.contribution_type,
                    value = record.contribution_value,
                    "saved contribution"
                );
                self.adopt(record);
                self.set_status(
                    Status::success(SAVE_SUCCESS_TEXT),
                    Some(Instant::now() + SUCCESS_STATUS_TTL),
                );
                self.render();
                Ok(())
            }
            Err(err) => Err(self.fail_save(err.into())),
        }
    }

    /// Clears a status whose display time has run out. Returns true when
    /// something was cleared.
    pub fn tick(&mut self) -> bool {
        match self.status_deadline {
            Some(deadline) if Instant::now() >= deadline => {
                self.set_status(Status::default(), None);
                self.render();
                true
            }
            _ => false,
        }
    }

    /// When the current status should disappear. The host has to call
    /// [`tick`](Self::tick) at this instant; nothing schedules it here.
    pub fn status_deadline(&self) -> Option<Instant> {
        self.status_deadline
    }

    pub fn record(&self) -> Option<&ContributionRecord> {
        self.record.as_ref()
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn save_state(&self) -> SaveState {
        self.save_state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Pending type/value pair, if the value parses.
    pub fn working_contribution(&self) -> Option<Contribution> {
        self.working
            .parsed_value()
            .map(|value| Contribution::new(self.working.contribution_type, value))
    }

    pub fn future_impact(&self) -> f64 {
        match (&self.record, self.working_contribution()) {
            (Some(record), Some(proposed)) => compute_future_impact(
                record.contribution(),
                proposed,
                record.user_info.age,
                record.user_info.salary,
            ),
            _ => 0.0,
        }
    }

    pub fn snapshot(&self) -> FormSnapshot {
        let (ytd, current) = match &self.record {
            Some(record) => (
                format_currency(record.ytd_contributions),
                describe_contribution(record.contribution()),
            ),
            None => (format_currency(0.0), String::new()),
        };

        FormSnapshot {
            loaded: self.record.is_some(),
            ytd_contributions: ytd,
            current_contribution: current,
            contribution_type: self.working.contribution_type,
            slider_value: self.working.slider.clone(),
            input_value: self.working.input.clone(),
            bounds: bounds_for(self.working.contribution_type),
            future_impact: format_currency(self.future_impact()),
            save_enabled: self.save_state.enabled(),
            save_label: self.save_state.label(),
            status: self.status.clone(),
        }
    }

    fn build_payload(&self) -> Result<ContributionRecord, SaveError> {
        let record = self.record.as_ref().ok_or(SaveError::NotLoaded)?;
        let proposed = self
            .working_contribution()
            .ok_or_else(|| SaveError::InvalidValue(self.working.input.clone()))?;
        Ok(record.with_contribution(proposed))
    }

    fn fail_save(&mut self, err: SaveError) -> ControllerError {
        error!("error saving data: {err}");
        self.set_status(Status::error(SAVE_ERROR_TEXT), None);
        self.render();
        ControllerError::Save(err)
    }

    fn adopt(&mut self, record: ContributionRecord) {
        self.working = WorkingState::from_contribution(record.contribution());
        self.record = Some(record);
    }

    fn set_status(&mut self, status: Status, deadline: Option<Instant>) {
        debug_assert!(deadline.is_none() || status.kind != StatusKind::None);
        self.status = status;
        self.status_deadline = deadline;
    }

    fn render(&mut self) {
        let snapshot = self.snapshot();
        self.view.render(&snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserInfo;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingView {
        frames: Vec<FormSnapshot>,
    }

    impl FormView for RecordingView {
        fn render(&mut self, snapshot: &FormSnapshot) {
            self.frames.push(snapshot.clone());
        }
    }

    impl RecordingView {
        fn last(&self) -> &FormSnapshot {
            self.frames.last().expect("nothing rendered")
        }
    }

    /// Serves `record` on fetch; answers saves with `save_reply`, or echoes
    /// the payload when that is unset.
    #[derive(Default)]
    struct FakeApi {
        record: Option<ContributionRecord>,
        save_reply: Option<ContributionRecord>,
        fail_save: bool,
        sent: Mutex<Vec<ContributionRecord>>,
    }

    #[async_trait]
    impl ContributionApi for FakeApi {
        async fn fetch(&self) -> Result<ContributionRecord, ClientError> {
            self.record
                .clone()
                .ok_or_else(|| ClientError::Rejected("offline".to_string()))
        }

        async fn save(&self, record: &ContributionRecord) -> Result<ContributionRecord, ClientError> {
            self.sent.lock().unwrap().push(record.clone());
            if self.fail_save {
                return Err(ClientError::Rejected("write failed".to_string()));
            }
            Ok(self.save_reply.clone().unwrap_or_else(|| record.clone()))
        }
    }

    fn sample_record() -> ContributionRecord {
        ContributionRecord {
            contribution_type: ContributionType::Percent,
            contribution_value: 5.0,
            ytd_contributions: 12_345.6,
            user_info: UserInfo {
                age: 35,
                salary: 2600.0,
            },
        }
    }

    fn loaded_api() -> FakeApi {
        FakeApi {
            record: Some(sample_record()),
            ..FakeApi::default()
        }
    }

    #[tokio::test]
    async fn load_renders_record() {
        let mut controller = ContributionController::new(loaded_api(), RecordingView::default());
        controller.load().await.unwrap();

        let frame = controller.view().last();
        assert!(frame.loaded);
        assert_eq!(frame.ytd_contributions, "$12,346");
        assert_eq!(frame.current_contribution, "5%");
        assert_eq!(frame.contribution_type, ContributionType::Percent);
        assert_eq!(frame.input_value, "5");
        assert_eq!(frame.bounds.max, 50.0);
        assert_eq!(frame.future_impact, "$0");
        assert!(frame.status.is_empty());
    }

    #[tokio::test]
    async fn load_failure_keeps_state_and_reports() {
        let mut controller = ContributionController::new(FakeApi::default(), RecordingView::default());
        let err = controller.load().await.unwrap_err();

        assert!(matches!(err, ControllerError::Load(_)));
        assert!(controller.record().is_none());
        let frame = controller.view().last();
        assert!(!frame.loaded);
        assert_eq!(frame.status, Status::error(LOAD_ERROR_TEXT));
        assert!(controller.status_deadline().is_none());
    }

    #[tokio::test]
    async fn type_change_resets_value_and_bounds() {
        let mut controller = ContributionController::new(loaded_api(), RecordingView::default());
        controller.load().await.unwrap();
        controller.on_value_change(ValueSource::Slider, "12.5");

        controller.on_type_change(ContributionType::Dollar);
        let frame = controller.view().last().clone();
        assert_eq!(frame.slider_value, "100");
        assert_eq!(frame.input_value, "100");
        assert_eq!((frame.bounds.max, frame.bounds.step), (2000.0, 10.0));
        assert_eq!(frame.bounds.unit, "$");

        controller.on_type_change(ContributionType::Percent);
        let frame = controller.view().last();
        assert_eq!(frame.input_value, "5");
        assert_eq!((frame.bounds.max, frame.bounds.step), (50.0, 0.5));
        assert_eq!(frame.bounds.unit, "%");
    }

    #[tokio::test]
    async fn value_change_keeps_controls_in_sync() {
        let mut controller = ContributionController::new(loaded_api(), RecordingView::default());
        controller.load().await.unwrap();

        controller.on_value_change(ValueSource::Slider, "10");
        let frame = controller.view().last();
        assert_eq!(frame.slider_value, frame.input_value);
        assert_eq!(frame.future_impact, "$12,280");

        controller.on_value_change(ValueSource::Input, "3");
        let frame = controller.view().last();
        assert_eq!(frame.slider_value, "3");
        assert_eq!(frame.input_value, "3");
        assert_eq!(frame.future_impact, "$0");
    }

    #[tokio::test]
    async fn unparsable_value_projects_zero_and_is_not_sent() {
        let mut controller = ContributionController::new(loaded_api(), RecordingView::default());
        controller.load().await.unwrap();
        controller.on_value_change(ValueSource::Input, "ten");

        assert_eq!(controller.future_impact(), 0.0);
        let err = controller.save().await.unwrap_err();
        assert!(matches!(err, ControllerError::Save(SaveError::InvalidValue(_))));
        assert!(controller.api.sent.lock().unwrap().is_empty());
        assert_eq!(controller.status(), &Status::error(SAVE_ERROR_TEXT));
    }

    #[tokio::test]
    async fn save_before_load_fails() {
        let mut controller = ContributionController::new(FakeApi::default(), RecordingView::default());
        let err = controller.save().await.unwrap_err();
        assert!(matches!(err, ControllerError::Save(SaveError::NotLoaded)));
        assert_eq!(controller.save_state(), SaveState::Idle);
    }

    #[tokio::test]
    async fn save_adopts_server_record() {
        let server_record = ContributionRecord {
            contribution_type: ContributionType::Dollar,
            contribution_value: 120.0,
            ytd_contributions: 20_000.0,
            user_info: UserInfo {
                age: 36,
                salary: 3000.0,
            },
        };
        let api = FakeApi {
            save_reply: Some(server_record.clone()),
            ..loaded_api()
        };
        let mut controller = ContributionController::new(api, RecordingView::default());
        controller.load().await.unwrap();
        controller.on_type_change(ContributionType::Dollar);
        controller.on_value_change(ValueSource::Input, "110");

        controller.save().await.unwrap();

        let sent = controller.api.sent.lock().unwrap().clone();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].contribution_type, ContributionType::Dollar);
        assert_eq!(sent[0].contribution_value, 110.0);
        assert_eq!(sent[0].ytd_contributions, 12_345.6);
        assert_eq!(sent[0].user_info, sample_record().user_info);

        assert_eq!(controller.record(), Some(&server_record));
        let frame = controller.view().last();
        assert_eq!(frame.input_value, "120");
        assert_eq!(frame.ytd_contributions, "$20,000");
        assert_eq!(frame.status, Status::success(SAVE_SUCCESS_TEXT));
        assert!(frame.save_enabled);
        assert_eq!(frame.save_label, "Save Changes");
    }

    #[tokio::test]
    async fn save_disables_button_while_in_flight() {
        let mut controller = ContributionController::new(loaded_api(), RecordingView::default());
        controller.load().await.unwrap();
        controller.on_value_change(ValueSource::Slider, "6");
        let before = controller.view().frames.len();

        controller.save().await.unwrap();

        let frames = &controller.view().frames[before..];
        assert!(!frames[0].save_enabled);
        assert_eq!(frames[0].save_label, "Saving...");
        let last = frames.last().unwrap();
        assert!(last.save_enabled);
        assert_eq!(last.save_label, "Save Changes");
    }

    #[tokio::test]
    async fn failed_save_keeps_state_and_reenables() {
        let api = FakeApi {
            fail_save: true,
            ..loaded_api()
        };
        let mut controller = ContributionController::new(api, RecordingView::default());
        controller.load().await.unwrap();
        controller.on_value_change(ValueSource::Input, "8");

        let err = controller.save().await.unwrap_err();
        assert!(matches!(err, ControllerError::Save(SaveError::Client(_))));

        assert_eq!(controller.record(), Some(&sample_record()));
        assert_eq!(controller.save_state(), SaveState::Idle);
        let frame = controller.view().last();
        assert!(frame.save_enabled);
        assert_eq!(frame.input_value, "8");
        assert_eq!(frame.status, Status::error(SAVE_ERROR_TEXT));
        assert!(controller.status_deadline().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn success_status_clears_after_delay() {
        let mut controller = ContributionController::new(loaded_api(), RecordingView::default());
        controller.load().await.unwrap();
        controller.save().await.unwrap();
        assert_eq!(controller.status().kind, StatusKind::Success);

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(!controller.tick());
        assert_eq!(controller.status().kind, StatusKind::Success);

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(controller.tick());
        assert!(controller.status().is_empty());
        assert!(controller.view().last().status.is_empty());
        assert!(controller.status_deadline().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn host_sleeping_until_deadline_clears_status() {
        let mut controller = ContributionController::new(loaded_api(), RecordingView::default());
        controller.load().await.unwrap();
        controller.save().await.unwrap();

        let deadline = controller.status_deadline().expect("success status has a deadline");
        tokio::time::sleep_until(deadline).await;
        assert!(controller.tick());
        assert!(controller.view().last().status.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn error_status_persists() {
        let api = FakeApi {
            fail_save: true,
            ..loaded_api()
        };
        let mut controller = ContributionController::new(api, RecordingView::default());
        controller.load().await.unwrap();
        let _ = controller.save().await;

        tokio::time::advance(Duration::from_secs(60)).await;
        assert!(!controller.tick());
        assert_eq!(controller.status(), &Status::error(SAVE_ERROR_TEXT));
    }
}
