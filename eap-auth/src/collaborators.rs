//! External collaborators consumed by the SIM/AKA/AKA' method state machines.
//!
//! These map to the "SIM/USIM interface" and "Subscriber identity interface"
//! of the external interfaces section: callers implement them and pass an
//! implementation in when constructing a method state machine (directly, or
//! via `ike-session`'s `open()`).

use async_trait::async_trait;

/// Application type distinguishing a 2G SIM run from a 3G/4G USIM run.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ApplicationType {
    /// GSM SIM, consulted via [SimAuthenticator::authenticate_sim].
    Sim,
    /// USIM, consulted via [SimAuthenticator::authenticate_aka].
    Usim,
}

/// Result of a GSM SIM authentication triplet run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimTriplet {
    /// 4-byte signed response.
    pub sres: [u8; 4],
    /// 8-byte ciphering key.
    pub kc: [u8; 8],
}

/// Result of a USIM AKA authentication vector run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AkaResult {
    /// Authentication succeeded: response, cipher key, integrity key.
    Success {
        /// RES, 4-16 bytes depending on the subscription.
        res: Vec<u8>,
        /// 16-byte cipher key.
        ck: [u8; 16],
        /// 16-byte integrity key.
        ik: [u8; 16],
    },
    /// Sequence number synchronization failure; carries AUTS for resynchronization.
    SyncFailure {
        /// 14-byte resynchronization token.
        auts: [u8; 14],
    },
}

/// The SIM/USIM authentication applet, consumed by the EAP-SIM/AKA/AKA'
/// method state machines during their Challenge state.
#[async_trait]
pub trait SimAuthenticator: Send + Sync {
    /// Runs one GSM SIM authentication triplet for `rand`.
    async fn authenticate_sim(&self, rand: [u8; 16]) -> Option<SimTriplet>;

    /// Runs one USIM AKA authentication vector for `rand`/`autn`.
    async fn authenticate_aka(&self, rand: [u8; 16], autn: [u8; 16]) -> Option<AkaResult>;
}

/// The subscriber identity source (IMSI or pseudonym), consumed by the
/// Start state of the EAP-SIM/AKA/AKA' method state machines.
#[async_trait]
pub trait SubscriberIdentitySource: Send + Sync {
    /// Returns the subscriber identity to place in `AT_IDENTITY`, or `None`
    /// if it is unavailable.
    async fn get_subscriber_id(&self) -> Option<String>;
}
