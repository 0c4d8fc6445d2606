//! Class request dispatcher for the video function
//!
//! Owns the negotiation state and the stream state machine. The USB stack
//! forwards class requests addressed to the VideoStreaming interface, the
//! request error code control on the VideoControl interface, and alternate
//! setting changes.

use super::{
    ClassRequest, STREAMING_ALT_SETTING, VC_REQUEST_ERROR_CODE_CONTROL, VS_COMMIT_CONTROL,
    VS_PROBE_CONTROL,
};
use crate::config::VideoConfig;
use crate::negotiation::{
    Accepted, NegotiationHandler, ProbeCommit, RequestErrorCode, PROBE_COMMIT_LEN,
};
use crate::stream::{StreamEvent, StreamState};

/// GET_INFO answer for probe/commit: supports GET and SET
const INFO_GET_SET: u8 = 0x03;

/// GET_INFO answer for the request error code control: GET only
const INFO_GET: u8 = 0x01;

/// Video function request state
#[derive(Debug, Clone)]
pub struct VideoStreamingControl {
    negotiation: NegotiationHandler,
    probe: ProbeCommit,
    commit: Option<(ProbeCommit, Accepted)>,
    state: StreamState,
    last_error: RequestErrorCode,
}

impl VideoStreamingControl {
    /// Create the control state for the configured stream
    pub fn new(config: &VideoConfig) -> Self {
        let negotiation = NegotiationHandler::new(config);
        let probe = negotiation.supported();
        Self {
            negotiation,
            probe,
            commit: None,
            state: StreamState::Idle,
            last_error: RequestErrorCode::NoError,
        }
    }

    /// Current stream state
    pub fn state(&self) -> StreamState {
        self.state
    }

    /// Parameters of the last accepted commit
    pub fn accepted(&self) -> Option<Accepted> {
        self.commit.map(|(_, accepted)| accepted)
    }

    /// Error code of the last VideoStreaming request
    pub fn last_error(&self) -> RequestErrorCode {
        self.last_error
    }

    /// Handle a SET request on the VideoStreaming interface
    pub fn set(&mut self, request: u8, selector: u8, data: &[u8]) -> Result<(), RequestErrorCode> {
        let result = match ClassRequest::from_u8(request) {
            Some(ClassRequest::SetCur) => self.set_cur(selector, data),
            _ => Err(RequestErrorCode::InvalidRequest),
        };
        self.record(result)
    }

    /// Handle a GET request on the VideoStreaming interface
    ///
    /// Writes the answer into `buf` and returns its length, truncated to
    /// `buf.len()`.
    pub fn get(
        &mut self,
        request: u8,
        selector: u8,
        buf: &mut [u8],
    ) -> Result<usize, RequestErrorCode> {
        let result = match ClassRequest::from_u8(request) {
            Some(request) => self.get_probe_commit(request, selector, buf),
            None => Err(RequestErrorCode::InvalidRequest),
        };
        self.record(result)
    }

    /// Handle a GET request on the VideoControl interface
    ///
    /// Only the request error code control exists. Reading it does not
    /// overwrite the stored code.
    pub fn get_control(
        &self,
        request: u8,
        selector: u8,
        buf: &mut [u8],
    ) -> Result<usize, RequestErrorCode> {
        if selector != VC_REQUEST_ERROR_CODE_CONTROL {
            return Err(RequestErrorCode::InvalidControl);
        }
        let value = match ClassRequest::from_u8(request) {
            Some(ClassRequest::GetCur) => self.last_error.as_u8(),
            Some(ClassRequest::GetInfo) => INFO_GET,
            _ => return Err(RequestErrorCode::InvalidRequest),
        };
        Ok(copy_out(&[value], buf))
    }

    /// Handle an alternate setting change on the VideoStreaming interface
    ///
    /// Selecting the streaming alternate setting only starts the stream
    /// after an accepted commit.
    pub fn set_alternate_setting(&mut self, alt: u8) -> StreamState {
        if alt == STREAMING_ALT_SETTING {
            if self.commit.is_some() {
                self.apply(StreamEvent::Start);
            }
        } else {
            self.commit = None;
            self.apply(StreamEvent::Stop);
        }
        self.state
    }

    /// Bus reset or unmount
    pub fn reset(&mut self) {
        self.probe = self.negotiation.supported();
        self.commit = None;
        self.last_error = RequestErrorCode::NoError;
        self.apply(StreamEvent::Reset);
    }

    fn set_cur(&mut self, selector: u8, data: &[u8]) -> Result<(), RequestErrorCode> {
        let requested = ProbeCommit::decode(data).map_err(|_| RequestErrorCode::InvalidRequest)?;

        match selector {
            VS_PROBE_CONTROL => {
                self.probe = self.negotiation.probe(&requested)?;
                self.apply(StreamEvent::Probe);
                Ok(())
            }
            VS_COMMIT_CONTROL => match self.negotiation.commit(&requested) {
                Ok(accepted) => {
                    let committed = ProbeCommit {
                        max_video_frame_size: accepted.max_video_frame_size,
                        max_payload_transfer_size: accepted.max_payload_transfer_size,
                        ..requested
                    };
                    self.commit = Some((committed, accepted));
                    self.apply(StreamEvent::CommitAccepted);
                    Ok(())
                }
                Err(code) => {
                    self.apply(StreamEvent::CommitRejected);
                    Err(code)
                }
            },
            _ => Err(RequestErrorCode::InvalidControl),
        }
    }

    fn get_probe_commit(
        &self,
        request: ClassRequest,
        selector: u8,
        buf: &mut [u8],
    ) -> Result<usize, RequestErrorCode> {
        if selector != VS_PROBE_CONTROL && selector != VS_COMMIT_CONTROL {
            return Err(RequestErrorCode::InvalidControl);
        }

        let block = match request {
            ClassRequest::GetCur if selector == VS_PROBE_CONTROL => self.probe,
            ClassRequest::GetCur => self
                .commit
                .map(|(committed, _)| committed)
                .unwrap_or(self.probe),
            ClassRequest::GetMin | ClassRequest::GetMax | ClassRequest::GetDef => {
                self.negotiation.supported()
            }
            ClassRequest::GetRes => ProbeCommit::default(),
            ClassRequest::GetLen => {
                return Ok(copy_out(&(PROBE_COMMIT_LEN as u16).to_le_bytes(), buf));
            }
            ClassRequest::GetInfo => return Ok(copy_out(&[INFO_GET_SET], buf)),
            ClassRequest::SetCur => return Err(RequestErrorCode::InvalidRequest),
        };

        Ok(copy_out(&block.to_bytes(), buf))
    }

    fn apply(&mut self, event: StreamEvent) {
        self.state = self.state.transition(event);
    }

    fn record<T>(&mut self, result: Result<T, RequestErrorCode>) -> Result<T, RequestErrorCode> {
        self.last_error = match &result {
            Ok(_) => RequestErrorCode::NoError,
            Err(code) => *code,
        };
        result
    }
}

fn copy_out(src: &[u8], dst: &mut [u8]) -> usize {
    let len = src.len().min(dst.len());
    dst[..len].copy_from_slice(&src[..len]);
    len
}
