//! Navigation behaviour through the public robot API
//!
//! Uses scripted mock hardware, so every sensor reading and battery level
//! is fixed by the test.
//!
//! Run with: `cargo test --test navigation`

use disha::devices::mock::{HardwareEvent, MockHardware};
use disha::navigation::parse_status;
use disha::{BatteryMode, CleaningRobot, Error, Facing, Position};

fn robot(hw: &MockHardware, room_x: u32, room_y: u32) -> CleaningRobot<MockHardware> {
    let mut robot = CleaningRobot::new(hw.clone());
    robot.initialize(room_x, room_y).unwrap();
    robot
}

/// All strings over {f,l,r} of exactly `len` characters
fn all_commands(len: usize) -> Vec<String> {
    let mut out = vec![String::new()];
    for _ in 0..len {
        out = out
            .iter()
            .flat_map(|prefix| ['f', 'l', 'r'].map(|c| format!("{}{}", prefix, c)))
            .collect();
    }
    out
}

// ============================================================================
// Status and basic motion
// ============================================================================

#[test]
fn test_initial_status() {
    let hw = MockHardware::new();
    let robot = robot(&hw, 5, 5);
    assert_eq!(robot.robot_status().unwrap(), "(0,0,N)");
}

#[test]
fn test_status_has_no_side_effects() {
    let hw = MockHardware::new();
    let robot = robot(&hw, 5, 5);
    hw.clear_events();

    for _ in 0..3 {
        assert_eq!(robot.robot_status().unwrap(), "(0,0,N)");
    }
    assert!(hw.events().is_empty());
}

#[test]
fn test_closed_square_returns_home() {
    let hw = MockHardware::new();
    let mut robot = robot(&hw, 5, 5);
    assert_eq!(robot.execute_command("frfrfrfr").unwrap(), "(0,0,N)");
    assert_eq!(hw.drive_count(), 4);
}

#[test]
fn test_four_turns_are_identity() {
    let hw = MockHardware::new();
    let mut robot = robot(&hw, 5, 5);

    for heading in ["", "r", "r", "r"] {
        robot.execute_command(heading).unwrap();
        let before = robot.state().unwrap().facing();
        robot.execute_command("rrrr").unwrap();
        assert_eq!(robot.state().unwrap().facing(), before);
        robot.execute_command("llll").unwrap();
        assert_eq!(robot.state().unwrap().facing(), before);
    }
}

#[test]
fn test_empty_command_is_noop() {
    let hw = MockHardware::new();
    let mut robot = robot(&hw, 3, 3);
    hw.clear_events();
    assert_eq!(robot.execute_command("").unwrap(), "(0,0,N)");
    assert!(hw.events().is_empty());
}

#[test]
fn test_position_stays_in_bounds() {
    for (room_x, room_y) in [(1, 1), (1, 3), (2, 2), (3, 1), (4, 2)] {
        for len in 1..=6 {
            for command in all_commands(len) {
                let hw = MockHardware::new();
                let mut robot = robot(&hw, room_x, room_y);
                let status = robot.execute_command(&command).unwrap();

                let report = parse_status(&status).unwrap();
                let Position { x, y } = report.position;
                assert!(
                    (0..room_x as i32).contains(&x) && (0..room_y as i32).contains(&y),
                    "{:?} in {}x{} left the room: {}",
                    command,
                    room_x,
                    room_y,
                    status
                );
                assert!(report.obstacles.is_empty());
            }
        }
    }
}

// ============================================================================
// Obstacles
// ============================================================================

#[test]
fn test_first_step_blocked() {
    let hw = MockHardware::new().with_obstacle_readings([true]);
    let mut robot = robot(&hw, 5, 5);
    assert_eq!(robot.execute_command("f").unwrap(), "(0,0,N)(0,1)");
    assert_eq!(hw.drive_count(), 0);
}

#[test]
fn test_obstacles_accumulate_across_batches() {
    let hw = MockHardware::new();
    let mut robot = robot(&hw, 5, 5);

    hw.push_obstacle_readings([true]);
    assert_eq!(robot.execute_command("f").unwrap(), "(0,0,N)(0,1)");

    // Same cell blocked again, then a clear step east
    hw.push_obstacle_readings([true, false]);
    assert_eq!(
        robot.execute_command("frf").unwrap(),
        "(1,0,E)(0,1)(0,1)"
    );
}

#[test]
fn test_obstacle_does_not_end_batch() {
    let hw = MockHardware::new().with_obstacle_readings([true, false]);
    let mut robot = robot(&hw, 5, 5);
    assert_eq!(robot.execute_command("ff").unwrap(), "(0,1,N)(0,1)");
}

#[test]
fn test_walls_are_not_logged() {
    let hw = MockHardware::new();
    let mut robot = robot(&hw, 2, 2);
    assert_eq!(robot.execute_command("fffrfff").unwrap(), "(1,1,E)");
    assert_eq!(hw.drive_count(), 2);
}

// ============================================================================
// Battery
// ============================================================================

#[test]
fn test_low_battery_after_move_freezes_robot() {
    let hw = MockHardware::new().with_battery_readings([100, 10]);
    let mut robot = robot(&hw, 5, 5);

    assert_eq!(robot.execute_command("fff").unwrap(), "(0,1,N)");
    assert!(hw.recharge_indicator());
    assert!(!hw.cleaning_system());
    assert_eq!(
        robot.state().unwrap().battery_mode(),
        BatteryMode::Recharging
    );
}

#[test]
fn test_turns_work_while_recharging() {
    let hw = MockHardware::new().with_battery_readings([3]);
    let mut robot = robot(&hw, 5, 5);

    assert_eq!(robot.execute_command("rfrfl").unwrap(), "(0,0,E)");
    assert_eq!(robot.state().unwrap().facing(), Facing::East);
    assert_eq!(hw.drive_count(), 0);
}

#[test]
fn test_recharged_robot_moves_again() {
    let hw = MockHardware::new().with_battery_readings([100, 8]);
    let mut robot = robot(&hw, 5, 5);
    assert_eq!(robot.execute_command("ff").unwrap(), "(0,1,N)");

    hw.push_battery_readings([95]);
    assert_eq!(robot.execute_command("f").unwrap(), "(0,2,N)");
    assert!(hw.cleaning_system());
    assert!(!hw.recharge_indicator());
}

#[test]
fn test_battery_fault_stops_batch() {
    let hw = MockHardware::new().with_battery_readings([100, 100, 250]);
    let mut robot = robot(&hw, 5, 5);

    let err = robot.execute_command("ffrff").unwrap_err();
    assert!(matches!(err, Error::HardwareFault(_)));
    assert_eq!(robot.robot_status().unwrap(), "(0,2,N)");
}

#[test]
fn test_drive_fault_stops_batch() {
    let hw = MockHardware::new().with_drive_fault("wheel jammed");
    let mut robot = robot(&hw, 5, 5);

    assert!(matches!(
        robot.execute_command("rf"),
        Err(Error::HardwareFault(_))
    ));
    // Turn before the fault stays applied, the failed move does not
    assert_eq!(robot.robot_status().unwrap(), "(0,0,E)");
    assert_eq!(robot.state().unwrap().facing(), Facing::East);
    assert_eq!(
        hw.events()
            .iter()
            .filter(|e| matches!(e, HardwareEvent::Rotate(_)))
            .count(),
        1
    );
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_invalid_command_keeps_progress() {
    let hw = MockHardware::new();
    let mut robot = robot(&hw, 2, 2);

    match robot.execute_command("fx") {
        Err(Error::InvalidCommand { index, character }) => {
            assert_eq!(index, 1);
            assert_eq!(character, 'x');
        }
        other => panic!("expected InvalidCommand, got {:?}", other),
    }
    assert_eq!(robot.robot_status().unwrap(), "(0,1,N)");
}

#[test]
fn test_invalid_first_character_touches_nothing() {
    let hw = MockHardware::new();
    let mut robot = robot(&hw, 2, 2);
    hw.clear_events();

    assert!(matches!(
        robot.execute_command("Ff"),
        Err(Error::InvalidCommand { index: 0, .. })
    ));
    assert!(hw.events().is_empty());
    assert_eq!(robot.robot_status().unwrap(), "(0,0,N)");
}

#[test]
fn test_uninitialized_robot() {
    let hw = MockHardware::new();
    let mut robot = CleaningRobot::new(hw.clone());

    assert!(matches!(robot.robot_status(), Err(Error::UninitializedRobot)));
    assert!(matches!(
        robot.execute_command("f"),
        Err(Error::UninitializedRobot)
    ));
    assert!(hw.events().is_empty());
}

#[test]
fn test_initialize_rehomes_hardware() {
    let hw = MockHardware::new();
    let mut robot = robot(&hw, 3, 3);
    robot.execute_command("ff").unwrap();
    robot.initialize(3, 3).unwrap();

    assert_eq!(hw.pose_resets(), 2);
    assert_eq!(robot.robot_status().unwrap(), "(0,0,N)");
}
