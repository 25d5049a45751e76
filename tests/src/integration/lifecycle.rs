//! # Program Lifecycle Flows
//!
//! End-to-end flows through `RewardProgramService` over the in-memory store:
//! create, opt-in, closeout, claims, owner-gated update/delete.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::*;
    use ambassador_rewards::domain::registry::REFERENCE_MEMBERS;
    use ambassador_rewards::prelude::*;

    // =============================================================================
    // CREATION
    // =============================================================================

    #[test]
    fn test_creation_with_wrong_arg_count_creates_nothing() {
        for count in [0u64, 1, 4, 6, 10] {
            let h = Harness::new();
            let tx = Transaction::create(owner(), (0..count).map(Bytes::from_u64).collect());
            let decision = h.submit(&tx, T0);
            assert_eq!(decision.as_u64(), 0, "count {count}");
            assert_eq!(decision.category(), Some(RejectCategory::MalformedInput));
            assert_eq!(h.global(), None);
        }
    }

    #[test]
    fn test_creation_sets_reference_parameters() {
        let h = Harness::new();
        assert!(h.create().approved);

        let g = h.global().unwrap();
        assert_eq!(g.owner, owner());
        assert_eq!(g.approved_pay_date, T0 + 2_419_200);
        assert_eq!(g.reward_per_head, 5_000);
        assert_eq!(g.reserve, 0);
        assert_eq!(g.total_supply, 700_000);
        assert_eq!(g.approved_bonus_pool, 0);
        assert_eq!(g.registry.members(), REFERENCE_MEMBERS.as_slice());
    }

    #[test]
    fn test_second_creation_rejected() {
        let h = Harness::new();
        h.create();
        let before = h.snapshot();

        let tx = Transaction::create(member(1), five_args());
        let decision = h.submit(&tx, T0 + 5);
        assert_eq!(decision.reason, Some(RejectReason::ProgramAlreadyExists));
        assert_eq!(h.snapshot(), before);
        assert_eq!(h.global().unwrap().owner, owner());
    }

    #[test]
    fn test_calls_before_creation_rejected() {
        let h = Harness::new();
        for tx in [
            Transaction::call(member(0), PROGRAM, OnCompletion::OptIn),
            Transaction::call(owner(), PROGRAM, OnCompletion::UpdateApplication),
            Transaction::call(member(0), PROGRAM, OnCompletion::CloseOut),
            Transaction::claim(member(0), PROGRAM, 1),
        ] {
            let decision = h.submit(&tx, T0);
            assert_eq!(decision.reason, Some(RejectReason::ProgramNotFound));
        }
        assert_eq!(h.snapshot(), StateSnapshot::default());
    }

    // =============================================================================
    // OWNER GATING
    // =============================================================================

    #[test]
    fn test_update_delete_only_by_owner() {
        let h = Harness::new();
        h.create();

        for oc in [OnCompletion::UpdateApplication, OnCompletion::DeleteApplication] {
            assert!(h.submit(&Transaction::call(owner(), PROGRAM, oc), T0 + 1).approved);

            let mut callers: Vec<Address> = REFERENCE_MEMBERS.to_vec();
            callers.push(outsider());
            callers.push(Address::ZERO);
            for caller in callers {
                let decision = h.submit(&Transaction::call(caller, PROGRAM, oc), T0 + 1);
                assert_eq!(decision.category(), Some(RejectCategory::Unauthorized));
            }
        }
    }

    #[test]
    fn test_delete_does_not_erase_state() {
        let h = Harness::new();
        h.create();
        let before = h.snapshot();
        let tx = Transaction::call(owner(), PROGRAM, OnCompletion::DeleteApplication);
        assert!(h.submit(&tx, T0 + 1).approved);
        assert_eq!(h.snapshot(), before);
    }

    // =============================================================================
    // REGISTRATION
    // =============================================================================

    #[test]
    fn test_only_registry_members_opt_in() {
        let h = Harness::new();
        h.create();

        for (i, m) in REFERENCE_MEMBERS.iter().enumerate() {
            assert!(h.opt_in(*m).approved);
            let local = h.local(m).unwrap();
            assert!(local.is_ambassador);
            assert_eq!(local.pay_count, 0);
            assert_eq!(local.balance, 0);
            assert_eq!(h.store_locals(), i + 1);
        }

        for caller in [owner(), outsider(), Address::ZERO] {
            let decision = h.opt_in(caller);
            assert_eq!(decision.category(), Some(RejectCategory::Ineligible));
            assert_eq!(h.local(&caller), None);
        }
    }

    #[test]
    fn test_double_opt_in_keeps_state() {
        let h = Harness::new();
        h.create();
        h.opt_in(member(2));
        h.close_out(member(2), T0 + 2);
        let before = h.local(&member(2));

        assert!(!h.opt_in(member(2)).approved);
        assert_eq!(h.local(&member(2)), before);
    }

    // =============================================================================
    // CLOSEOUT
    // =============================================================================

    #[test]
    fn test_closeout_splits_reserve() {
        let h = Harness::new();
        h.create();
        h.opt_in(member(0));
        assert!(h.close_out(member(0), T0 + 2).approved);

        let g = h.global().unwrap();
        assert_eq!(g.approved_bonus_pool, 500_000);
        assert_eq!(g.reserve, 200_000);
        assert_eq!(g.reserve + g.approved_bonus_pool, g.total_supply);
        assert!(h.local(&member(0)).unwrap().authorization_account);
    }

    #[test]
    fn test_closeout_requires_local_state() {
        let h = Harness::new();
        h.create();
        let decision = h.close_out(owner(), T0 + 2);
        assert_eq!(decision.reason, Some(RejectReason::NotOptedIn { caller: owner() }));
        assert_eq!(h.global().unwrap().approved_bonus_pool, 0);
    }

    #[test]
    fn test_closeout_underflow_rejected() {
        let config = ProgramConfig {
            asset_balance: 400_000,
            bonus_pool_reservation: 400_000,
            ..ProgramConfig::default()
        };
        let h = Harness::with_config(config);
        h.create();
        h.opt_in(member(0));
        assert!(h.close_out(member(0), T0 + 2).approved);
        assert_eq!(h.global().unwrap().reserve, 0);

        // A store restored with a smaller supply cannot cover the reservation.
        let mut snap = h.snapshot();
        if let Some(g) = snap.global.as_mut() {
            g.total_supply = 1_000;
        }
        h.restore(snap);
        let decision = h.close_out(member(0), T0 + 3);
        assert_eq!(
            decision.reason,
            Some(RejectReason::ReservationExceedsSupply {
                supply: 1_000,
                reservation: 400_000
            })
        );
    }

    // =============================================================================
    // CLAIMS
    // =============================================================================

    #[test]
    fn test_claim_before_pay_date_always_rejected() {
        let h = Harness::ready();
        for caller in [member(0), member(1), outsider(), owner()] {
            for amount in [0, 1, 5_000, u64::MAX] {
                let decision = h.claim(caller, amount, PAY_DATE - 1);
                assert!(matches!(
                    decision.reason,
                    Some(RejectReason::PayDateNotReached { .. })
                ));
            }
        }
    }

    #[test]
    fn test_reference_claim() {
        let h = Harness::ready();
        let decision = h.claim(member(0), 5_000, PAY_DATE);
        assert!(decision.approved);

        assert_eq!(h.global().unwrap().approved_bonus_pool, 495_000);
        let local = h.local(&member(0)).unwrap();
        assert_eq!(local.balance, 5_000);
        assert_eq!(local.pay_count, 1);
        assert_eq!(local.pay_time, PAY_DATE);
    }

    #[test]
    fn test_repeat_claim_cooldown() {
        let h = Harness::ready();
        assert!(h.claim(member(0), 5_000, PAY_DATE + 10).approved);

        let early = h.claim(member(0), 5_000, PAY_DATE + 2_419_199);
        assert!(matches!(
            early.reason,
            Some(RejectReason::CooldownActive { .. })
        ));

        assert!(h.claim(member(0), 5_000, PAY_DATE + 2_419_200).approved);
        let local = h.local(&member(0)).unwrap();
        assert_eq!(local.pay_count, 2);
        assert_eq!(local.balance, 10_000);
        assert_eq!(h.global().unwrap().approved_bonus_pool, 490_000);
    }

    #[test]
    fn test_cooldown_anchored_to_pay_date_not_last_payment() {
        // Once pay_date + cooldown has passed, only strict ordering separates claims.
        let h = Harness::ready();
        let open = PAY_DATE + 2_419_200;
        assert!(h.claim(member(0), 5_000, PAY_DATE).approved);
        assert!(h.claim(member(0), 5_000, open).approved);
        assert!(h.claim(member(0), 5_000, open + 1).approved);
        assert!(h.claim(member(0), 5_000, open + 2).approved);

        let local = h.local(&member(0)).unwrap();
        assert_eq!(local.pay_count, 4);
        assert_eq!(local.pay_time, open + 2);
        assert_eq!(h.global().unwrap().approved_bonus_pool, 480_000);
    }

    #[test]
    fn test_claim_at_same_timestamp_rejected() {
        let h = Harness::ready();
        let now = PAY_DATE + 2_419_200;
        assert!(h.claim(member(0), 1, now).approved);
        let again = h.claim(member(0), 1, now);
        assert!(matches!(
            again.reason,
            Some(RejectReason::NotAfterLastPayment { .. })
        ));
    }

    #[test]
    fn test_claim_without_opt_in_rejected() {
        let h = Harness::ready();
        let decision = h.claim(member(4), 5_000, PAY_DATE);
        assert_eq!(
            decision.reason,
            Some(RejectReason::NotOptedIn { caller: member(4) })
        );
    }

    #[test]
    fn test_claim_as_raw_payment_rejected() {
        let h = Harness::ready();
        let mut tx = Transaction::claim(member(0), PROGRAM, 5_000);
        tx.txn_type = TxnType::Payment;
        let decision = h.submit(&tx, PAY_DATE);
        assert_eq!(decision.reason, Some(RejectReason::NotApplicationCall));
    }

    #[test]
    fn test_claim_exceeding_pool_rejected() {
        let h = Harness::ready();
        let decision = h.claim(member(0), 500_001, PAY_DATE);
        assert_eq!(decision.category(), Some(RejectCategory::PreconditionFailed));
        assert_eq!(h.global().unwrap().approved_bonus_pool, 500_000);
        assert_eq!(h.local(&member(0)).unwrap().pay_count, 0);
    }

    #[test]
    fn test_claim_before_closeout_has_empty_pool() {
        let h = Harness::new();
        h.create();
        h.opt_in(member(0));
        let decision = h.claim(member(0), 1, PAY_DATE);
        assert!(matches!(
            decision.reason,
            Some(RejectReason::InsufficientPool { available: 0, .. })
        ));
    }

    #[test]
    fn test_malformed_amount_rejected() {
        let h = Harness::ready();
        let mut tx = Transaction::claim(member(0), PROGRAM, 0);
        tx.args = vec![Bytes::from_slice(&[0xFF; 9])];
        let decision = h.submit(&tx, PAY_DATE);
        assert_eq!(decision.category(), Some(RejectCategory::MalformedInput));
    }

    #[test]
    fn test_unrecognized_transaction_rejected() {
        let h = Harness::ready();
        let tx = Transaction::call(member(0), PROGRAM, OnCompletion::NoOp);
        let decision = h.submit(&tx, PAY_DATE);
        assert_eq!(decision.route, None);
        assert_eq!(decision.category(), Some(RejectCategory::Unrecognized));
    }

    #[test]
    fn test_rejected_transaction_is_idempotent() {
        let h = Harness::ready();
        let before = h.snapshot();
        let tx = Transaction::claim(outsider(), PROGRAM, 5_000);
        for _ in 0..3 {
            assert!(!h.submit(&tx, PAY_DATE).approved);
            assert_eq!(h.snapshot(), before);
        }
    }

    #[test]
    fn test_full_program_run_stats() {
        let h = Harness::ready();
        for m in REFERENCE_MEMBERS {
            assert!(h.claim(m, 5_000, PAY_DATE + 1).approved);
        }
        assert_eq!(h.global().unwrap().approved_bonus_pool, 475_000);

        let stats = h.service.stats();
        // create + 5 opt-ins + closeout + 5 claims
        assert_eq!(stats.approved, 12);
        assert_eq!(stats.rejected, 0);
    }
}
