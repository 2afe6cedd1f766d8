use tui_textarea::Input;

use super::HealthReport;
use super::RequestOutcome;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RequestId(pub u64);

pub enum Event {
    HealthChecked(Result<HealthReport, String>),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardCTRLS(),
    KeyboardCTRLT(),
    KeyboardCancel(),
    KeyboardEnter(),
    KeyboardPaste(String),
    KeyboardTab(),
    RequestFinished(RequestId, RequestOutcome),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UITick(),
}
