//! Conveyor motor driver
//!
//! This driver provides:
//! - H-bridge drive patterns for run, brake and release
//! - A fixed PWM duty set once at startup
//!
//! # Usage
//!
//! ```ignore
//! let mut conveyor = ConveyorMotor::new(drive_bus, pwm);
//! conveyor.set_speed(config.conveyor_duty)?;
//! conveyor.set_state(ConveyorState::Start);
//! ```

use embedded_hal::pwm::SetDutyCycle;

use sortline_core::traits::{ConveyorDriver, ConveyorState, MotorError, PatternOutput};

/// Bridge enabled, forward rotation
pub const DRIVE_FORWARD: u8 = 0b0111;
/// Both bridge legs high: active brake
pub const DRIVE_BRAKE: u8 = 0b1111;
/// Bridge enables low: motor coasts
pub const DRIVE_DISABLED: u8 = 0b0000;
/// Bridge enabled, reverse rotation; wired but never commanded
pub const DRIVE_REVERSE: u8 = 0b1011;

/// PWM compare value range
const DUTY_MAX: u16 = 255;

/// Conveyor motor on an H-bridge
pub struct ConveyorMotor<O, P> {
    drive: O,
    pwm: P,
    state: ConveyorState,
    duty: u8,
}

impl<O, P> ConveyorMotor<O, P>
where
    O: PatternOutput,
    P: SetDutyCycle,
{
    /// Create a conveyor driver with the bridge released
    pub fn new(drive: O, pwm: P) -> Self {
        let mut motor = Self {
            drive,
            pwm,
            state: ConveyorState::Disable,
            duty: 0,
        };
        motor.set_state(ConveyorState::Disable);
        motor
    }

    /// Last duty set, out of 255
    pub fn duty(&self) -> u8 {
        self.duty
    }

    fn pattern(state: ConveyorState) -> u8 {
        match state {
            ConveyorState::Start => DRIVE_FORWARD,
            ConveyorState::Stop => DRIVE_BRAKE,
            ConveyorState::Disable => DRIVE_DISABLED,
        }
    }
}

impl<O, P> ConveyorDriver for ConveyorMotor<O, P>
where
    O: PatternOutput,
    P: SetDutyCycle,
{
    fn set_state(&mut self, state: ConveyorState) {
        self.drive.write_pattern(Self::pattern(state));
        self.state = state;
    }

    fn state(&self) -> ConveyorState {
        self.state
    }

    fn set_speed(&mut self, duty: u8) -> Result<(), MotorError> {
        self.pwm
            .set_duty_cycle_fraction(u16::from(duty), DUTY_MAX)
            .map_err(|_| MotorError::Pwm)?;
        self.duty = duty;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::pwm::ErrorType;

    #[derive(Default)]
    struct MockDrive {
        pattern: Option<u8>,
    }

    impl PatternOutput for MockDrive {
        fn write_pattern(&mut self, pattern: u8) {
            self.pattern = Some(pattern);
        }
    }

    struct MockPwm {
        max: u16,
        duty: u16,
    }

    impl ErrorType for MockPwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for MockPwm {
        fn max_duty_cycle(&self) -> u16 {
            self.max
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
            self.duty = duty;
            Ok(())
        }
    }

    fn conveyor(max: u16) -> ConveyorMotor<MockDrive, MockPwm> {
        ConveyorMotor::new(MockDrive::default(), MockPwm { max, duty: 0 })
    }

    #[test]
    fn test_starts_released() {
        let motor = conveyor(255);
        assert_eq!(motor.state(), ConveyorState::Disable);
        assert_eq!(motor.drive.pattern, Some(DRIVE_DISABLED));
        assert!(!motor.is_running());
    }

    #[test]
    fn test_drive_patterns() {
        let mut motor = conveyor(255);

        motor.set_state(ConveyorState::Start);
        assert_eq!(motor.drive.pattern, Some(0b0111));
        assert!(motor.is_running());

        motor.set_state(ConveyorState::Stop);
        assert_eq!(motor.drive.pattern, Some(0b1111));

        motor.set_state(ConveyorState::Disable);
        assert_eq!(motor.drive.pattern, Some(0b0000));
    }

    #[test]
    fn test_duty_scaled_to_pwm_range() {
        let mut motor = conveyor(255);
        motor.set_speed(0x50).unwrap();
        assert_eq!(motor.pwm.duty, 0x50);
        assert_eq!(motor.duty(), 0x50);

        // Wider counter: same fraction
        let mut motor = conveyor(2550);
        motor.set_speed(0x50).unwrap();
        assert_eq!(motor.pwm.duty, 800);
    }

    #[test]
    fn test_speed_does_not_change_state() {
        let mut motor = conveyor(255);
        motor.set_state(ConveyorState::Start);
        motor.set_speed(10).unwrap();
        assert_eq!(motor.state(), ConveyorState::Start);
    }
}
