//! Transparent-clock forwarding: which messages cross which ports, residence
//! time correction, cross-port Sync/FollowUp and DelayReq/DelayResp
//! correlation, and the IEC 62439-3 HSR/PRP overlay on top of all of it.

pub mod block_filter;
pub mod correlator;
pub mod forwarder;
pub mod hsr_prp;

pub use block_filter::blocked;
pub use correlator::{Correlator, TxDescriptor};
pub use forwarder::{
    forward_announce, forward_delay_req, forward_delay_resp, forward_followup, forward_onestep_event,
    forward_sync_two_step, offer_onestep_followup, offer_onestep_sync, synthesize_followup, EgressTiming,
    ForwardedMessage, OneStepOutcome,
};
