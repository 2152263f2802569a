use super::*;
use crate::mocks::{LoadedDice, Recorder};
use craps_types::{Phase, Resolution};
use std::sync::mpsc;

fn table(pairs: &[(u8, u8)]) -> (Table<LoadedDice>, Recorder) {
    let recorder = Recorder::new();
    let mut table = Table::new(LoadedDice::pairs(pairs));
    table.subscribe(recorder.clone());
    (table, recorder)
}

/// Fund, confirm, wager and start.
fn seated(pairs: &[(u8, u8)], bank: u64, bet: u64) -> (Table<LoadedDice>, Recorder) {
    let (mut table, recorder) = table(pairs);
    table.fund_bank(bank).unwrap();
    table.confirm_bank().unwrap();
    table.place_bet(bet).unwrap();
    table.start_round().unwrap();
    recorder.clear();
    (table, recorder)
}

#[test]
fn test_natural_win_scenario() {
    let (mut table, recorder) = table(&[(3, 4)]);

    table.fund_bank(1_000).unwrap();
    table.confirm_bank().unwrap();
    table.place_bet(200).unwrap();
    assert_eq!(table.ledger().bank(), 800);
    assert_eq!(table.ledger().bet(), 200);

    table.start_round().unwrap();
    let report = table.roll().expect("round is live");
    assert_eq!(report.roll.total, 7);
    assert_eq!(report.roll.resolution, Resolution::PlayerWin);
    assert_eq!(report.credited, 400);
    assert!(!report.session_over);

    assert_eq!(table.engine().player_wins(), 1);
    assert!(!table.engine().is_active());
    assert_eq!(table.ledger().bank(), 1_200);

    assert_eq!(
        recorder.names(),
        vec![
            "bank_set",
            "bet_set",
            "round_started",
            "dice_rolled",
            "win_loss_decided",
            "bank_set",
        ]
    );
    assert_eq!(
        recorder.events().last(),
        Some(&Event::BankSet { bank: 1_200 })
    );
}

#[test]
fn test_all_funds_lost_scenario() {
    let (mut table, recorder) = seated(&[(1, 1)], 500, 500);
    assert_eq!(table.ledger().bank(), 0);

    let report = table.roll().expect("round is live");
    assert_eq!(report.roll.total, 2);
    assert_eq!(report.roll.resolution, Resolution::HouseWin);
    assert_eq!(report.credited, 0);
    assert!(report.session_over);

    // The hard reset wipes the house win that caused the bankruptcy.
    assert_eq!(table.engine().house_wins(), 0);
    assert_eq!(table.engine().point(), 0);
    assert_eq!(table.ledger().bank(), 0);
    assert_eq!(table.ledger().bet(), 0);
    assert!(!table.is_started());

    let events = recorder.events();
    assert!(matches!(events[0], Event::DiceRolled(_)));
    assert_eq!(
        events[1..],
        [
            Event::WinLossDecided { player_won: false },
            Event::BankReset,
            Event::SessionOver { bankrupt: true },
            Event::SessionOver { bankrupt: true },
            Event::DisplayReset,
        ]
    );
}

#[test]
fn test_bankrupt_session_can_be_refunded() {
    let (mut table, _) = seated(&[(1, 1), (5, 6)], 100, 100);
    table.roll();
    assert!(!table.is_started());

    assert_eq!(
        table.start_round(),
        Err(IllegalOperation::RoundNotConfirmed.into())
    );
    table.fund_bank(300).unwrap();
    table.confirm_bank().unwrap();
    table.place_bet(50).unwrap();
    table.start_round().unwrap();

    let report = table.roll().unwrap();
    assert_eq!(report.credited, 100);
    assert_eq!(table.ledger().bank(), 350);
    assert_eq!(table.engine().player_wins(), 1);
}

#[test]
fn test_point_round() {
    let (mut table, recorder) = seated(&[(4, 4), (6, 5), (2, 3), (5, 3)], 1_000, 100);

    let report = table.roll().unwrap();
    assert_eq!(report.roll.resolution, Resolution::PointEstablished(8));
    assert_eq!(table.engine().phase(), Phase::Point);

    for _ in 0..2 {
        let report = table.roll().unwrap();
        assert_eq!(report.roll.resolution, Resolution::NoDecision);
        assert_eq!(report.credited, 0);
    }

    let report = table.roll().unwrap();
    assert_eq!(report.roll.resolution, Resolution::PlayerWin);
    assert_eq!(report.credited, 200);
    assert_eq!(table.ledger().bank(), 1_100);
    assert_eq!(
        recorder.names(),
        vec![
            "dice_rolled",
            "dice_rolled",
            "dice_rolled",
            "dice_rolled",
            "win_loss_decided",
            "bank_set",
        ]
    );
}

#[test]
fn test_roll_before_start_is_noop() {
    let (mut table, recorder) = table(&[]);
    assert!(table.roll().is_none());

    table.fund_bank(100).unwrap();
    table.confirm_bank().unwrap();
    recorder.clear();
    assert!(table.roll().is_none());
    assert!(recorder.events().is_empty());
}

#[test]
fn test_roll_after_resolution_is_noop() {
    let (mut table, recorder) = seated(&[(6, 5)], 100, 10);
    table.roll().unwrap();
    let emitted = recorder.events().len();

    assert!(table.roll().is_none());
    assert_eq!(recorder.events().len(), emitted);
}

#[test]
fn test_start_requires_confirmation() {
    let (mut table, _) = table(&[]);
    let not_confirmed: TableError = IllegalOperation::RoundNotConfirmed.into();

    assert_eq!(table.start_round(), Err(not_confirmed));
    table.fund_bank(100).unwrap();
    assert_eq!(table.start_round(), Err(not_confirmed));
    table.confirm_bank().unwrap();
    assert_eq!(table.start_round(), Err(not_confirmed));
    table.place_bet(10).unwrap();
    table.start_round().unwrap();
    assert!(table.is_started());
    assert!(table.engine().is_active());
}

#[test]
fn test_bets_refused_before_bank_confirmed() {
    let (mut table, recorder) = table(&[(3, 4)]);
    table.fund_bank(1_000).unwrap();
    recorder.clear();

    let unconfirmed: TableError = IllegalOperation::BankNotConfirmed.into();
    assert_eq!(table.place_bet(800), Err(unconfirmed));
    assert_eq!(table.increase_bet(BetIncrement::Hundred), Err(unconfirmed));
    assert_eq!(table.all_in(), Err(unconfirmed));
    assert_eq!(table.ledger().bank(), 1_000);
    assert_eq!(table.ledger().bet(), 0);
    assert!(recorder.events().is_empty());

    // Re-funding cannot stack a new bank on top of an escrowed bet.
    table.fund_bank(1_000).unwrap();
    table.confirm_bank().unwrap();
    table.place_bet(800).unwrap();
    table.start_round().unwrap();
    let report = table.roll().unwrap();
    assert_eq!(report.credited, 1_600);
    assert_eq!(table.ledger().bank(), 1_800);
}

#[test]
fn test_start_twice() {
    let (mut table, _) = seated(&[(2, 2), (3, 4)], 100, 10);
    assert_eq!(
        table.start_round(),
        Err(IllegalOperation::RoundInProgress.into())
    );

    table.roll();
    table.roll();
    assert_eq!(
        table.start_round(),
        Err(IllegalOperation::RoundResolved.into())
    );
}

#[test]
fn test_bank_locked_after_confirm() {
    let (mut table, _) = table(&[]);
    table.fund_bank(100).unwrap();
    table.fund_bank(250).unwrap();
    table.confirm_bank().unwrap();

    let locked: TableError = IllegalOperation::BankLocked.into();
    assert_eq!(table.fund_bank(500), Err(locked));
    assert_eq!(table.confirm_bank(), Err(locked));
    assert_eq!(table.ledger().bank(), 250);
}

#[test]
fn test_increase_bet_chips() {
    let (mut table, _) = table(&[]);
    table.fund_bank(60).unwrap();
    table.confirm_bank().unwrap();

    assert_eq!(table.increase_bet(BetIncrement::Ten), Ok(10));
    assert_eq!(table.increase_bet(BetIncrement::Five), Ok(15));
    assert_eq!(table.increase_bet(BetIncrement::One), Ok(16));
    assert_eq!(table.ledger().bank(), 44);

    // bet + chip is compared against the remaining bank.
    assert_eq!(
        table.increase_bet(BetIncrement::Fifty),
        Err(TableError::InsufficientFunds {
            requested: 66,
            available: 44
        })
    );
    assert_eq!(table.ledger().bet(), 16);
    assert_eq!(table.ledger().bank(), 44);
}

#[test]
fn test_all_in_guard() {
    let (mut table, recorder) = table(&[]);
    table.fund_bank(1_000).unwrap();
    table.confirm_bank().unwrap();
    table.place_bet(200).unwrap();
    recorder.clear();

    assert_eq!(table.all_in(), Ok(true));
    assert_eq!(table.ledger().bet(), 1_000);
    assert_eq!(table.ledger().bank(), 0);
    assert_eq!(
        recorder.events(),
        vec![Event::BetSet { bet: 1_000 }, Event::BankSet { bank: 0 }]
    );

    // Nothing left to add.
    assert_eq!(table.all_in(), Ok(false));
    assert_eq!(table.ledger().bet(), 1_000);
}

#[test]
fn test_all_in_when_bet_exceeds_bank() {
    let (mut table, _) = table(&[]);
    table.fund_bank(1_000).unwrap();
    table.confirm_bank().unwrap();
    table.place_bet(600).unwrap();

    assert_eq!(table.all_in(), Ok(false));
    assert_eq!(table.ledger().bank(), 400);
    assert_eq!(table.ledger().bet(), 600);
}

#[test]
fn test_raise_during_live_round() {
    let (mut table, _) = seated(&[(2, 3), (4, 1)], 500, 100);
    table.roll();
    assert_eq!(table.increase_bet(BetIncrement::Hundred), Ok(200));
    assert_eq!(table.ledger().bank(), 300);

    let report = table.roll().unwrap();
    assert_eq!(report.credited, 400);
    assert_eq!(table.ledger().bank(), 700);
}

#[test]
fn test_bet_changes_refused_after_resolution() {
    let (mut table, _) = seated(&[(6, 6)], 500, 100);
    table.roll();

    let resolved: TableError = IllegalOperation::RoundResolved.into();
    assert_eq!(table.place_bet(200), Err(resolved));
    assert_eq!(table.increase_bet(BetIncrement::One), Err(resolved));
    assert_eq!(table.all_in(), Err(resolved));
    assert_eq!(table.ledger().bank(), 400);
}

#[test]
fn test_play_again_rides_the_bet() {
    let (mut table, recorder) = seated(&[(6, 6), (3, 4)], 500, 100);
    table.roll();
    assert_eq!(table.ledger().bank(), 400);
    recorder.clear();

    assert_eq!(table.play_again(), Ok(true));
    assert_eq!(table.ledger().bank(), 300);
    assert_eq!(table.ledger().bet(), 100);
    assert!(table.engine().is_active());
    assert_eq!(table.engine().phase(), Phase::ComeOut);
    assert_eq!(table.engine().house_wins(), 1);
    assert_eq!(
        recorder.events(),
        vec![
            Event::BetSet { bet: 100 },
            Event::RoundStarted { active: true },
        ]
    );

    let report = table.roll().unwrap();
    assert_eq!(report.credited, 200);
    assert_eq!(table.ledger().bank(), 500);
    assert_eq!(table.engine().player_wins(), 1);
}

#[test]
fn test_play_again_while_live() {
    let (mut table, _) = seated(&[(5, 5)], 500, 100);
    table.roll();
    assert_eq!(
        table.play_again(),
        Err(IllegalOperation::RoundInProgress.into())
    );
}

#[test]
fn test_play_again_before_start() {
    let (mut table, _) = table(&[]);
    assert_eq!(
        table.play_again(),
        Err(IllegalOperation::RoundNotConfirmed.into())
    );
}

#[test]
fn test_play_again_bet_not_covered() {
    let (mut table, recorder) = seated(&[(1, 2)], 150, 100);
    table.roll();
    assert_eq!(table.ledger().bank(), 50);
    recorder.clear();

    assert_eq!(table.play_again(), Ok(false));
    assert!(!table.is_started());
    assert_eq!(table.ledger().bet(), 0);
    assert_eq!(table.ledger().bank(), 50);
    assert_eq!(recorder.events(), vec![Event::BetSet { bet: 0 }]);

    table.place_bet(25).unwrap();
    table.start_round().unwrap();
    assert!(table.engine().is_active());
}

#[test]
fn test_reset() {
    let (mut table, recorder) = seated(&[(5, 6)], 500, 100);
    table.roll();
    recorder.clear();

    table.reset();
    assert!(!table.is_started());
    assert_eq!(table.engine().player_wins(), 0);
    assert_eq!(table.ledger().bank(), 0);
    assert_eq!(table.ledger().bet(), 0);
    assert!(!table.ledger().bank_confirmed());
    assert_eq!(
        recorder.events(),
        vec![Event::DisplayReset, Event::BankReset]
    );

    // A fresh session is possible after a reset.
    table.fund_bank(10).unwrap();
    table.confirm_bank().unwrap();
}

#[test]
fn test_channel_subscriber_sees_full_stream() {
    let (mut table, _) = table(&[(3, 4)]);
    let (tx, rx) = mpsc::channel();
    table.subscribe(crate::observer::Channel(tx));

    table.fund_bank(100).unwrap();
    table.confirm_bank().unwrap();
    table.place_bet(10).unwrap();
    table.start_round().unwrap();
    table.roll();

    let names: Vec<_> = rx.try_iter().map(|event| event.name()).collect();
    assert_eq!(
        names,
        vec![
            "bank_set",
            "bet_set",
            "round_started",
            "dice_rolled",
            "win_loss_decided",
            "bank_set",
        ]
    );
}

#[test]
fn test_seeded_tables_replay() {
    let seed = [42u8; 32];
    let play = |table: &mut Table| {
        table.fund_bank(1_000).unwrap();
        table.confirm_bank().unwrap();
        table.place_bet(10).unwrap();
        table.start_round().unwrap();
        let mut rolls = Vec::new();
        for _ in 0..200 {
            match table.roll() {
                Some(report) => rolls.push(report.roll),
                None => {
                    if !table.is_started() || !table.play_again().unwrap() {
                        break;
                    }
                }
            }
        }
        (rolls, table.ledger().bank())
    };

    let mut first = Table::new(DiceRng::new(seed, 0));
    let mut second = Table::new(DiceRng::new(seed, 0));
    assert_eq!(play(&mut first), play(&mut second));
}
