//! Shared harness for the end-to-end flows.

use ambassador_rewards::domain::registry::REFERENCE_MEMBERS;
use ambassador_rewards::prelude::*;

/// Creation time used by every flow.
pub const T0: u64 = 1_700_000_000;
/// First allowed claim time for a program created at `T0`.
pub const PAY_DATE: u64 = T0 + 2_419_200;
/// Hosted program id.
pub const PROGRAM: ProgramId = ProgramId(1);

pub fn owner() -> Address {
    Address::new([0xAA; 32])
}

pub fn member(i: usize) -> Address {
    REFERENCE_MEMBERS[i]
}

pub fn outsider() -> Address {
    Address::new([0x5A; 32])
}

pub fn five_args() -> Vec<Bytes> {
    (0..5).map(Bytes::from_u64).collect()
}

/// A service over a fresh in-memory ledger.
pub struct Harness {
    pub service: RewardProgramService<InMemoryStateStore>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(ProgramConfig::default())
    }

    pub fn with_config(config: ProgramConfig) -> Self {
        Self {
            service: RewardProgramService::new(
                InMemoryStateStore::new(),
                config,
                ServiceConfig {
                    program_id: PROGRAM,
                    check_invariants: true,
                },
            ),
        }
    }

    /// Created, every member opted in, pool reserved by member 0.
    pub fn ready() -> Self {
        let h = Self::new();
        assert!(h.create().approved);
        for m in REFERENCE_MEMBERS {
            assert!(h.opt_in(m).approved);
        }
        assert!(h.close_out(member(0), T0 + 2).approved);
        h
    }

    pub fn submit(&self, tx: &Transaction, now: u64) -> Decision {
        self.service
            .process(tx, &LedgerContext::at(now))
            .expect("in-memory store never fails")
    }

    pub fn create(&self) -> Decision {
        self.submit(&Transaction::create(owner(), five_args()), T0)
    }

    pub fn opt_in(&self, caller: Address) -> Decision {
        self.submit(&Transaction::call(caller, PROGRAM, OnCompletion::OptIn), T0 + 1)
    }

    pub fn close_out(&self, caller: Address, now: u64) -> Decision {
        self.submit(&Transaction::call(caller, PROGRAM, OnCompletion::CloseOut), now)
    }

    pub fn claim(&self, caller: Address, amount: u64, now: u64) -> Decision {
        self.submit(&Transaction::claim(caller, PROGRAM, amount), now)
    }

    pub fn global(&self) -> Option<GlobalState> {
        self.service.store().global().expect("readable")
    }

    pub fn local(&self, account: &Address) -> Option<LocalState> {
        self.service.store().local(account).expect("readable")
    }

    pub fn store_locals(&self) -> usize {
        self.service.store().local_count()
    }

    pub fn snapshot(&self) -> StateSnapshot {
        self.service.snapshot().expect("readable")
    }

    pub fn restore(&self, snapshot: StateSnapshot) {
        self.service.store().restore(snapshot).expect("writable");
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}
