mod common;

use std::collections::BTreeSet;

use common::{approx, engine, Clock, Fault, Recorder};
use fugit::MillisDurationU32;
use quadruped_walker::gait::engine::{GaitEngine, Heading};
use quadruped_walker::gait::stance::{Rotation, Stance, STANCES};
use quadruped_walker::robot::commands::GaitCommand;
use quadruped_walker::robot::config::{Timing, CALIBRATION};
use quadruped_walker::robot::joint::Joint;
use quadruped_walker::robot::leg::{Leg, LegMap};
use quadruped_walker::Error;

/// Writes of the snap to zero that opens every gait.
const SNAP: usize = 12;

fn channels(writes: &[(u8, u16)]) -> BTreeSet<u8> {
    writes.iter().map(|(c, _)| *c).collect()
}

fn assert_stances(actual: &LegMap<Stance>, expected: &LegMap<Stance>) {
    for (leg, stance) in actual.iter() {
        for (angle, target) in stance.angles().iter().zip(expected[leg].angles()) {
            assert!(approx(*angle, target), "{leg}: {angle} vs {target}");
        }
    }
}

/// Angles per position once `writes` updates of a one-cycle walk went through.
fn walk_halted_after(heading: Heading, writes: usize) -> LegMap<Stance> {
    let mut engine = engine();
    engine.driver_mut().fail_after = Some(writes);
    let walked = match heading {
        Heading::Forward => engine.walk_forward(1),
        Heading::Backward => engine.walk_backward(1),
    };
    assert_eq!(walked, Err(Error::Driver(Fault)));
    assert_eq!(engine.driver().writes.len(), writes);
    engine.angles()
}

#[test]
fn slow_pose_issues_forty_updates_ending_on_the_target() {
    let mut engine = engine();
    engine
        .slow_pose(Leg::FrontLeft, Stance::new(40.0, 0.0, 0.0))
        .unwrap();

    let hip = CALIBRATION[Leg::FrontLeft][Joint::Hip as usize];
    let signals = engine.driver().signals(hip.channel());
    assert_eq!(signals.len(), 40);
    for (tick, signal) in signals.iter().enumerate() {
        assert_eq!(*signal as i32, hip.signal(tick as f32 + 1.0));
    }
    assert_eq!(*signals.last().unwrap(), 391);
    assert_eq!(engine.leg(Leg::FrontLeft).servo(Joint::Hip).angle(), 40.0);

    let (_, clock) = engine.release();
    assert_eq!(clock.pauses, 40);
    assert_eq!(clock.ns, 250_000_000);
}

#[test]
fn propel_moves_all_twelve_joints_on_every_tick() {
    let mut engine = engine();
    let targets = LegMap::new(STANCES.reach, STANCES.side_step, STANCES.high, STANCES.rest);
    engine.propel_slowly(&targets).unwrap();

    for (leg, joints) in CALIBRATION.iter() {
        for (joint, cal) in joints.iter().enumerate() {
            let signals = engine.driver().signals(cal.channel());
            assert_eq!(signals.len(), 40, "{leg} {}", Joint::from(joint));
            let target = targets[leg].angles()[joint];
            assert_eq!(*signals.last().unwrap() as i32, cal.signal(target));
        }
    }
    for (leg, stance) in engine.angles().iter() {
        assert_eq!(*stance, targets[leg]);
    }
    // leg-then-joint order inside a tick
    let first_tick: Vec<u8> = engine.driver().writes[..12].iter().map(|(c, _)| *c).collect();
    assert_eq!(first_tick, [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]);
}

#[test]
fn no_joint_arrives_before_the_last_tick() {
    let mut engine = engine();
    let targets = LegMap::new(STANCES.reach, STANCES.side_step, STANCES.high, STANCES.rest);
    // let 39 full ticks through, then cut the driver
    engine.driver_mut().fail_after = Some(39 * 12);
    assert_eq!(engine.propel_slowly(&targets), Err(Error::Driver(Fault)));

    for (leg, stance) in engine.angles().iter() {
        for (angle, target) in stance.angles().iter().zip(targets[leg].angles()) {
            assert!(approx(*angle, target * 39.0 / 40.0), "{leg}: {angle} vs {target}");
            if target != 0.0 {
                assert_ne!(*angle, target);
            }
        }
    }
}

#[test]
fn walk_zero_only_sets_up_and_parks() {
    let mut engine = engine();
    engine.walk(0).unwrap();

    let writes = &engine.driver().writes;
    // snap, zero, rest, front right side step, rest, high, disable
    assert_eq!(writes.len(), SNAP + 480 + 480 + 120 + 480 + 480 + 12);
    assert_eq!(channels(&writes[..SNAP]), (0..12).collect());
    let side_step = SNAP + 960;
    assert_eq!(
        channels(&writes[side_step..side_step + 120]),
        BTreeSet::from([3, 4, 5])
    );
    let tail: Vec<(u8, u16)> = writes[writes.len() - 12..].to_vec();
    assert_eq!(tail, (0..12).map(|c| (c, 0)).collect::<Vec<_>>());

    for (_, stance) in engine.angles().iter() {
        assert_eq!(*stance, STANCES.high);
    }
    let (_, clock) = engine.release();
    assert_eq!(clock.pauses, 4 + 160 + 160 + 40 + 160 + 160);
}

#[test]
fn walk_cycle_runs_six_phases_per_step() {
    let mut engine = engine();
    engine.walk_forward(1).unwrap();

    let writes = &engine.driver().writes;
    let setup = SNAP + 1080;
    let cycle = 2 * (80 + 120 + 80 + 120 + 480);
    assert_eq!(writes.len(), setup + cycle + 972);

    // phase 1: back right bends up and side-steps
    assert_eq!(channels(&writes[setup..setup + 80]), BTreeSet::from([10, 11]));
    assert_eq!(
        channels(&writes[setup + 80..setup + 200]),
        BTreeSet::from([9, 10, 11])
    );
    // phase 2: front right
    assert_eq!(
        channels(&writes[setup + 200..setup + 400]),
        BTreeSet::from([3, 4, 5])
    );
    // phases 4 and 5: back left, then front left
    let left = setup + 400 + 480;
    assert_eq!(channels(&writes[left..left + 200]), BTreeSet::from([6, 7, 8]));
    assert_eq!(
        channels(&writes[left + 200..left + 400]),
        BTreeSet::from([0, 1, 2])
    );

    let (_, clock) = engine.release();
    // 1320 ticks plus the settle after the first push
    assert_eq!(clock.ns, 1320 * 6_250_000 + 250_000_000);
}

#[test]
fn walk_pushes_land_on_the_reaching_stances() {
    // setup, then phases 1 to 3 and 1 to 6
    let first_push = SNAP + 1080 + 80 + 120 + 80 + 120 + 480;
    let second_push = first_push + 80 + 120 + 80 + 120 + 480;

    for heading in [Heading::Forward, Heading::Backward] {
        assert_stances(
            &walk_halted_after(heading, first_push),
            &STANCES.reaching(Leg::BackLeft),
        );
        assert_stances(
            &walk_halted_after(heading, second_push),
            &STANCES.reaching(Leg::BackRight),
        );
    }
}

#[test]
fn walk_halfway_has_the_left_legs_forward() {
    // phases 4 and 5 done, second push not started
    let before_push = SNAP + 1080 + 80 + 120 + 80 + 120 + 480 + 80 + 120 + 80 + 120;
    let expected = LegMap::new(STANCES.reach, STANCES.rest, STANCES.side_step, STANCES.rest);
    assert_stances(&walk_halted_after(Heading::Forward, before_push), &expected);
}

#[test]
fn walking_backward_pushes_the_physical_diagonal() {
    let mut engine = engine();
    let first_push = SNAP + 1080 + 80 + 120 + 80 + 120 + 480;
    engine.driver_mut().fail_after = Some(first_push);
    assert!(engine.walk_backward(1).is_err());

    // the back left position is the physical front right leg
    engine.face(Heading::Forward);
    assert_stances(&engine.angles(), &STANCES.reaching(Leg::FrontRight));
}

#[test]
fn walking_backward_rebinds_positions_to_the_opposite_corner() {
    let mut engine = engine();
    engine.walk_backward(0).unwrap();
    assert_eq!(engine.heading(), Heading::Backward);

    // the front right side step lands on the physical back left leg
    let writes = &engine.driver().writes;
    let side_step = SNAP + 960;
    assert_eq!(
        channels(&writes[side_step..side_step + 120]),
        BTreeSet::from([6, 7, 8])
    );
    assert_eq!(
        engine.leg(Leg::FrontRight).servo(Joint::Hip).channel(),
        CALIBRATION[Leg::BackLeft][0].channel()
    );

    engine.execute(GaitCommand::RotateCw, 0).unwrap();
    assert_eq!(engine.heading(), Heading::Forward);
}

#[test]
fn rotation_replants_front_left_back_left_back_right_front_right() {
    let mut engine = engine();
    engine.rotate_cw(1).unwrap();

    let writes = &engine.driver().writes;
    let replant = SNAP + 480 + 480 + 480;
    let order: Vec<BTreeSet<u8>> = writes[replant..replant + 480]
        .chunks(120)
        .map(channels)
        .collect();
    assert_eq!(
        order,
        [
            BTreeSet::from([0, 1, 2]),
            BTreeSet::from([6, 7, 8]),
            BTreeSet::from([9, 10, 11]),
            BTreeSet::from([3, 4, 5]),
        ]
    );
    assert_eq!(writes.len(), replant + 480 + 972);
}

#[test]
fn rotation_twist_reaches_the_hip_targets() {
    let mut engine = engine();
    engine.rest_pose_simultaneously().unwrap();
    let twist = STANCES.twist(Rotation::CounterClockwise);
    engine.propel_slowly(&twist).unwrap();
    for (leg, stance) in engine.angles().iter() {
        assert!(approx(stance.hip, twist[leg].hip));
        assert!(approx(stance.knee, STANCES.rest.knee));
        assert!(approx(stance.ankle, STANCES.rest.ankle));
    }
}

#[test]
fn driver_failure_stops_the_gait() {
    let mut engine = engine();
    engine.driver_mut().fail_after = Some(100);
    assert_eq!(engine.walk_forward(2), Err(Error::Driver(Fault)));
    assert_eq!(engine.driver().writes.len(), 100);
}

#[test]
fn unreachable_signal_is_reported_with_its_channel() {
    let mut stances = STANCES;
    stances.high = Stance::new(0.0, -500.0, 80.0);
    let mut engine = engine().with_stances(stances);
    match engine.high_pose_simultaneously() {
        Err(Error::SignalOutOfRange { channel, signal }) => {
            assert_eq!(channel, 1);
            assert!(signal < 0);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn shorter_timing_keeps_the_lockstep() {
    let mut engine = GaitEngine::new(Recorder::default(), Clock::default(), &CALIBRATION)
        .unwrap()
        .with_timing(Timing::new(4, MillisDurationU32::from_ticks(100)));
    engine.rest_pose_simultaneously().unwrap();
    assert_eq!(engine.driver().signals(0).len(), 1 + 4);
    for (_, stance) in engine.angles().iter() {
        assert_eq!(*stance, STANCES.rest);
    }
    let (_, clock) = engine.release();
    assert_eq!(clock.ns, 16 * 25_000_000);
}

#[test]
fn gaits_open_with_a_snap_to_zero() {
    let mut engine = engine();
    engine.high_pose_simultaneously().unwrap();
    engine.driver_mut().writes.clear();
    // halt right after the snap
    engine.driver_mut().fail_after = Some(SNAP);
    assert_eq!(engine.rotate_ccw(1), Err(Error::Driver(Fault)));
    assert_eq!(engine.driver().writes.len(), SNAP);
    for (_, stance) in engine.angles().iter() {
        assert_eq!(*stance, STANCES.zero);
    }
}
