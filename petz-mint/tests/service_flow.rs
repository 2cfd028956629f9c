//! Service-level flows: minting, ownership, admin tuning, and a shared
//! clock driving decay.

use std::sync::Arc;
use std::thread;

use petz_core::config::PetzConfig;
use petz_core::events::{EventLog, PetEvent};
use petz_core::types::{OwnerId, PetId, Timestamp};
use petz_core::PetzError;
use petz_mint::{Clock, ManualClock, PetService};

const HOUR: u64 = 3600;

fn service() -> (
    PetService<Arc<ManualClock>, Arc<EventLog>>,
    Arc<ManualClock>,
    Arc<EventLog>,
) {
    let clock = Arc::new(ManualClock::new(Timestamp(0)));
    let log = Arc::new(EventLog::new());
    let svc = PetService::new(&PetzConfig::default(), Arc::clone(&clock), Arc::clone(&log))
        .expect("default config is valid");
    (svc, clock, log)
}

#[test]
fn day_in_the_life_of_a_pet() {
    let (svc, clock, log) = service();
    let alice = OwnerId::new();
    let pet = svc.mint(alice, "ipfs://pets/0").expect("minting open");

    clock.advance(3 * HOUR);
    let stats = svc.stats(pet).expect("minted");
    assert_eq!((stats.hunger, stats.happiness), (97, 97));
    assert_eq!(stats.last_interaction, Timestamp(0));

    let fed = svc.feed(alice, pet).expect("owner");
    assert_eq!(fed.applied_delta, 3);

    let trained = svc.train(alice, pet).expect("fed");
    assert_eq!(trained.record.experience, 10);
    assert_eq!(trained.record.happiness, 92);

    assert_eq!(
        log.events(),
        vec![
            PetEvent::Created { id: pet },
            PetEvent::Fed {
                id: pet,
                new_hunger: 100,
                applied_delta: 3
            },
            PetEvent::Trained {
                id: pet,
                new_experience: 10,
                new_level: 0
            },
        ]
    );
}

#[test]
fn only_the_owner_may_interact() {
    let (svc, _clock, log) = service();
    let alice = OwnerId::new();
    let bob = OwnerId::new();
    let alices = svc.mint(alice, "a").expect("open");
    let bobs = svc.mint(bob, "b").expect("open");
    log.drain();

    assert!(matches!(
        svc.feed(bob, alices),
        Err(PetzError::Unauthorized { pet, caller }) if pet == alices && caller == bob
    ));
    assert!(matches!(svc.train(alice, bobs), Err(PetzError::Unauthorized { .. })));
    assert!(log.is_empty());

    svc.feed(bob, bobs).expect("own pet");
    assert_eq!(svc.registry().balance_of(alice), 1);
    assert_eq!(svc.registry().balance_of(bob), 1);
}

#[test]
fn unminted_pet_is_unauthorized_for_everyone() {
    let (svc, _clock, _log) = service();
    assert!(matches!(
        svc.feed(OwnerId::new(), PetId(42)),
        Err(PetzError::Unauthorized { .. })
    ));
    assert!(matches!(svc.stats(PetId(42)), Err(PetzError::NotFound(_))));
    assert!(matches!(svc.level(PetId(42)), Err(PetzError::NotFound(_))));
}

#[test]
fn mint_gate_can_be_closed_from_config() {
    let config = PetzConfig::from_toml("[admin]\nminting_allowed = false").expect("valid");
    let svc = PetService::new(&config, ManualClock::default(), EventLog::new()).expect("valid");
    assert!(matches!(
        svc.mint(OwnerId::new(), "x"),
        Err(PetzError::CreationDisabled)
    ));
    svc.set_minting_allowed(true);
    assert!(svc.mint(OwnerId::new(), "x").is_ok());
}

#[test]
fn custom_rules_flow_through() {
    let config = PetzConfig::from_toml(
        r"
        [rules]
        decay_interval_secs = 60
        decay_rate = 10
        feed_replenish = 5
        ",
    )
    .expect("valid");
    let clock = Arc::new(ManualClock::new(Timestamp(0)));
    let svc = PetService::new(&config, Arc::clone(&clock), EventLog::new()).expect("valid");
    let owner = OwnerId::new();
    let pet = svc.mint(owner, "x").expect("open");

    clock.advance(90);
    let fed = svc.feed(owner, pet).expect("owner");
    assert_eq!(fed.record.hunger, 95);
    assert_eq!(fed.record.last_interaction, Timestamp(60));
}

#[test]
fn starving_pet_recovers_after_feeding() {
    let (svc, clock, _log) = service();
    let owner = OwnerId::new();
    let pet = svc.mint(owner, "x").expect("open");

    clock.advance(100 * HOUR);
    assert!(matches!(svc.train(owner, pet), Err(PetzError::TooHungry(_))));
    assert_eq!(
        svc.controller().store().get(pet).expect("minted").last_interaction,
        Timestamp(0)
    );

    svc.feed(owner, pet).expect("owner");
    svc.train(owner, pet).expect("no longer starving");
    assert_eq!(svc.stats(pet).expect("minted").experience, 10);
}

#[test]
fn concurrent_feeds_and_trains_are_linearizable() {
    let (svc, clock, log) = service();
    let svc = Arc::new(svc);
    let owner = OwnerId::new();
    let pet = svc.mint(owner, "x").expect("open");
    clock.set(Timestamp(HOUR * 2));

    let handles: Vec<_> = (0..6)
        .map(|i| {
            let svc = Arc::clone(&svc);
            thread::spawn(move || {
                for _ in 0..10 {
                    if i % 2 == 0 {
                        svc.feed(owner, pet).expect("owner");
                    } else {
                        svc.train(owner, pet).expect("hunger stays high");
                    }
                }
            })
        })
        .collect();
    for h in handles {
        h.join().expect("worker finished");
    }

    let stats = svc.stats(pet).expect("minted");
    assert_eq!(stats.experience, 300);
    assert_eq!(stats.hunger, 100);
    assert_eq!(stats.last_interaction, clock.now());
    assert_eq!(svc.controller().counters().snapshot().intervals_settled, 2);
    assert_eq!(log.len(), 61);
}
