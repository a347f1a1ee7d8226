//! Main-loop controller coordinating queue, tray, conveyor and display
//!
//! The controller is the only place multi-step work happens:
//! - Consumes conditions raised by the handlers through [`SorterSignals`]
//! - Owns the in-flight item queue and the per-bin counters
//! - Drives the tray and conveyor through their traits
//! - Applies mode transitions and writes operator messages
//!
//! Call [`Controller::boot`] once, then [`Controller::poll`] in a loop until
//! the mode is terminal. Each poll handles at most one condition, checked in
//! the order fault, classification, exit, ramp-down, pause.

use embedded_hal::delay::DelayNs;

use crate::config::SorterConfig;
use crate::signals::SorterSignals;
use crate::sorting::{ItemQueue, ItemRecord, MaterialType, SortCounts};
use crate::state::{Event, FaultKind, Mode};
use crate::traits::{
    ConveyorDriver, ConveyorState, DisplayDriver, DisplayExt, MotorError, TrayDriver,
};

/// Header row of the count table
const COUNT_HEADER: &str = "AL WH ST BL #OB";

/// Controller state for coordinating subsystems
pub struct Controller<'a, T, C, D, W> {
    signals: &'a SorterSignals,
    tray: T,
    conveyor: C,
    display: D,
    delay: W,
    config: SorterConfig,
    /// Items between the entry and exit sensors
    queue: ItemQueue,
    counts: SortCounts,
    mode: Mode,
}

impl<'a, T, C, D, W> Controller<'a, T, C, D, W>
where
    T: TrayDriver,
    C: ConveyorDriver,
    D: DisplayDriver,
    W: DelayNs,
{
    pub fn new(
        signals: &'a SorterSignals,
        tray: T,
        conveyor: C,
        display: D,
        delay: W,
        config: SorterConfig,
    ) -> Self {
        Self {
            signals,
            tray,
            conveyor,
            display,
            delay,
            config,
            queue: ItemQueue::new(),
            counts: SortCounts::new(),
            mode: Mode::Boot,
        }
    }

    /// Home the tray and start the belt
    ///
    /// Returns the number of steps homing took.
    pub fn boot(&mut self) -> Result<u32, MotorError> {
        self.show(Some("Searching for"), Some("homing position"));
        let steps = self.tray.find_home();
        self.show(Some("Found"), Some("homing position"));

        self.conveyor.set_speed(self.config.conveyor_duty)?;
        self.conveyor.set_state(ConveyorState::Start);

        self.apply(Event::BootComplete);
        Ok(steps)
    }

    /// Handle the highest-priority pending condition
    ///
    /// Returns the event handled, or `None` if nothing was pending.
    pub fn poll(&mut self) -> Option<Event> {
        if self.mode.is_terminal() {
            return None;
        }

        if let Some(kind) = self.signals.take_fault() {
            return Some(self.fault(kind));
        }

        match self.mode {
            Mode::Running => self.poll_running(),
            Mode::Paused => self.poll_paused(),
            _ => None,
        }
    }

    fn poll_running(&mut self) -> Option<Event> {
        if let Some(material) = self.signals.take_classification() {
            return Some(self.item_classified(material));
        }

        if self.signals.take_item_at_exit() {
            return Some(self.item_at_exit());
        }

        // The countdown stays pending until the belt is clear
        if self.queue.is_empty() && self.signals.take_ramp_down() {
            return Some(self.ramp_down());
        }

        if self.signals.is_paused() {
            return Some(self.pause());
        }

        None
    }

    fn poll_paused(&mut self) -> Option<Event> {
        if self.signals.is_paused() {
            return None;
        }

        self.show(Some("System Resumed"), None);
        self.conveyor.set_state(ConveyorState::Start);
        Some(self.apply(Event::Resume))
    }

    fn item_classified(&mut self, material: MaterialType) -> Event {
        match self.queue.enqueue(ItemRecord::new(material)) {
            Ok(()) => {
                self.show(Some("Item type"), Some(material.name()));
                self.apply(Event::ItemClassified(material))
            }
            Err(_) => self.fault(FaultKind::QueueOverflow),
        }
    }

    fn item_at_exit(&mut self) -> Event {
        self.conveyor.set_state(ConveyorState::Stop);

        let material = match self.queue.dequeue() {
            Ok(record) => record.into_material(),
            Err(_) => return self.fault(FaultKind::QueueUnderflow),
        };

        self.show(Some("Rotating tray"), None);
        let _ = self
            .display
            .write_number(0, 1, u32::from(material.code()), 3);

        let plan = self.tray.plan_for(material);
        self.show(None, None);
        let _ = self.display.write_number(0, 0, u32::from(plan.target), 5);
        let _ = self.display.write_number(0, 1, u32::from(plan.steps), 5);
        self.tray.execute(&plan);

        self.counts.record(material);
        self.conveyor.set_state(ConveyorState::Start);

        self.apply(Event::ItemSorted(material))
    }

    fn ramp_down(&mut self) -> Event {
        self.apply(Event::RampDown);

        self.show(Some("Ramping down"), None);
        self.stop_conveyor();
        self.show_counts();

        self.apply(Event::RampDownComplete)
    }

    fn pause(&mut self) -> Event {
        self.conveyor.set_state(ConveyorState::Stop);
        self.show(Some("System Paused"), None);
        self.delay.delay_ms(self.config.timing.pause_settle_ms);
        self.show_counts();

        self.apply(Event::Pause)
    }

    fn fault(&mut self, kind: FaultKind) -> Event {
        self.show(Some(kind.message()), None);
        self.stop_conveyor();

        self.apply(Event::FaultDetected(kind))
    }

    /// Brake, let the belt settle, then release the bridge
    fn stop_conveyor(&mut self) {
        self.conveyor.set_state(ConveyorState::Stop);
        self.delay.delay_ms(self.config.timing.brake_settle_ms);
        self.conveyor.set_state(ConveyorState::Disable);
    }

    /// Count table: per-bin totals and the number of items in flight
    fn show_counts(&mut self) {
        self.show(Some(COUNT_HEADER), None);

        let columns = [
            (0, self.counts.aluminum),
            (3, self.counts.white),
            (6, self.counts.steel),
            (9, self.counts.black),
        ];
        for (col, count) in columns {
            let _ = self.display.write_number(col, 1, u32::from(count), 2);
        }
        let _ = self.display.write_number(13, 1, self.queue.size() as u32, 2);
    }

    /// Write operator lines; a display failure never stops the belt
    fn show(&mut self, line1: Option<&str>, line2: Option<&str>) {
        let _ = self.display.write_lines(line1, line2);
    }

    fn apply(&mut self, event: Event) -> Event {
        self.mode = self.mode.transition(event);
        event
    }

    /// Get the current mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn counts(&self) -> &SortCounts {
        &self.counts
    }

    /// Number of items in flight
    pub fn queue_size(&self) -> usize {
        self.queue.size()
    }

    pub fn tray(&self) -> &T {
        &self.tray
    }

    pub fn conveyor(&self) -> &C {
        &self.conveyor
    }

    pub fn display(&self) -> &D {
        &self.display
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::RotationPlan;
    use crate::traits::{Direction, DisplayError};

    struct MockTray {
        position: u16,
        slots: crate::config::SlotMap,
        moves: Vec<RotationPlan>,
        homed: bool,
    }

    impl MockTray {
        fn new() -> Self {
            Self {
                position: 37,
                slots: Default::default(),
                moves: Vec::new(),
                homed: false,
            }
        }
    }

    impl TrayDriver for MockTray {
        fn find_home(&mut self) -> u32 {
            let steps = u32::from(200 - self.position);
            self.position = 0;
            self.homed = true;
            steps
        }

        fn position(&self) -> u16 {
            self.position
        }

        fn slot_for(&self, material: MaterialType) -> u16 {
            self.slots.slot(material)
        }

        fn execute(&mut self, plan: &RotationPlan) {
            self.moves.push(*plan);
            self.position = plan.target;
        }
    }

    #[derive(Default)]
    struct MockConveyor {
        state: ConveyorState,
        duty: Option<u8>,
        history: Vec<ConveyorState>,
    }

    impl ConveyorDriver for MockConveyor {
        fn set_state(&mut self, state: ConveyorState) {
            self.state = state;
            self.history.push(state);
        }

        fn state(&self) -> ConveyorState {
            self.state
        }

        fn set_speed(&mut self, duty: u8) -> Result<(), MotorError> {
            self.duty = Some(duty);
            Ok(())
        }
    }

    /// Keeps the screen contents and every line ever written
    #[derive(Default)]
    struct MockDisplay {
        rows: [String; 2],
        log: Vec<String>,
    }

    impl MockDisplay {
        fn row(&self, row: usize) -> &str {
            self.rows[row].trim_end()
        }

        fn saw(&self, text: &str) -> bool {
            self.log.iter().any(|line| line == text)
        }
    }

    impl DisplayDriver for MockDisplay {
        fn clear(&mut self) -> Result<(), DisplayError> {
            self.rows = [" ".repeat(16), " ".repeat(16)];
            Ok(())
        }

        fn text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
            let line = &mut self.rows[usize::from(row)];
            let col = usize::from(col);
            let end = (col + text.len()).min(16);
            line.replace_range(col..end, &text[..end - col]);
            self.log.push(text.into());
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockDelay {
        total_ms: u32,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ms += ns / 1_000_000;
        }

        fn delay_ms(&mut self, ms: u32) {
            self.total_ms += ms;
        }
    }

    type TestController<'a> = Controller<'a, MockTray, MockConveyor, MockDisplay, MockDelay>;

    fn booted(signals: &SorterSignals) -> TestController<'_> {
        let mut controller = Controller::new(
            signals,
            MockTray::new(),
            MockConveyor::default(),
            MockDisplay::default(),
            MockDelay::default(),
            SorterConfig::default(),
        );
        controller.boot().unwrap();
        controller
    }

    #[test]
    fn test_boot() {
        let signals = SorterSignals::new();
        let mut controller = Controller::new(
            &signals,
            MockTray::new(),
            MockConveyor::default(),
            MockDisplay::default(),
            MockDelay::default(),
            SorterConfig::default(),
        );
        assert_eq!(controller.mode(), Mode::Boot);
        assert_eq!(controller.poll(), None);

        assert_eq!(controller.boot(), Ok(163));
        assert_eq!(controller.mode(), Mode::Running);
        assert!(controller.tray().homed);
        assert_eq!(controller.tray().position, 0);
        assert_eq!(controller.conveyor().duty, Some(0x50));
        assert_eq!(controller.conveyor().state, ConveyorState::Start);
        assert!(controller.display().saw("Searching for"));
        assert_eq!(controller.display().row(0), "Found");
        assert_eq!(controller.display().row(1), "homing position");
    }

    #[test]
    fn test_idle_poll() {
        let signals = SorterSignals::new();
        let mut controller = booted(&signals);
        assert_eq!(controller.poll(), None);
        assert_eq!(controller.mode(), Mode::Running);
    }

    #[test]
    fn test_steel_item_end_to_end() {
        let signals = SorterSignals::new();
        let mut controller = booted(&signals);

        signals.post_classification(MaterialType::Steel);
        assert_eq!(
            controller.poll(),
            Some(Event::ItemClassified(MaterialType::Steel))
        );
        assert_eq!(controller.queue_size(), 1);
        assert_eq!(controller.display().row(0), "Item type");
        assert_eq!(controller.display().row(1), "STEEL");

        signals.flag_item_at_exit();
        assert_eq!(controller.poll(), Some(Event::ItemSorted(MaterialType::Steel)));
        assert_eq!(controller.queue_size(), 0);

        // Home to steel goes the short way round
        let plan = controller.tray().moves[0];
        assert_eq!(plan.target, 150);
        assert_eq!(plan.direction, Direction::CounterClockwise);
        assert_eq!(plan.steps, 50);

        assert_eq!(controller.counts().steel, 1);
        assert_eq!(controller.display().row(0), "00150");
        assert_eq!(controller.display().row(1), "00050");
        assert!(controller.display().saw("Rotating tray"));
        assert!(controller.display().saw("001"));

        // Belt braked for the rotation, then restarted
        let history = &controller.conveyor().history;
        assert_eq!(
            history[history.len() - 2..],
            [ConveyorState::Stop, ConveyorState::Start]
        );
    }

    #[test]
    fn test_aluminum_item_rotates_clockwise() {
        let signals = SorterSignals::new();
        let mut controller = booted(&signals);

        signals.post_classification(MaterialType::Aluminum);
        controller.poll();
        signals.flag_item_at_exit();
        controller.poll();

        let plan = controller.tray().moves[0];
        assert_eq!(plan.direction, Direction::Clockwise);
        assert_eq!(plan.steps, 50);
        assert_eq!(controller.counts().aluminum, 1);
    }

    #[test]
    fn test_items_sorted_in_arrival_order() {
        let signals = SorterSignals::new();
        let mut controller = booted(&signals);

        for material in [MaterialType::White, MaterialType::Black, MaterialType::Steel] {
            signals.post_classification(material);
            controller.poll();
        }
        assert_eq!(controller.queue_size(), 3);

        let mut sorted = Vec::new();
        for _ in 0..3 {
            signals.flag_item_at_exit();
            sorted.push(controller.poll());
        }
        assert_eq!(
            sorted,
            [
                Some(Event::ItemSorted(MaterialType::White)),
                Some(Event::ItemSorted(MaterialType::Black)),
                Some(Event::ItemSorted(MaterialType::Steel)),
            ]
        );

        // 0 -> 100 -> 0 -> 150
        let targets: Vec<u16> = controller.tray().moves.iter().map(|p| p.target).collect();
        assert_eq!(targets, [100, 0, 150]);
        assert_eq!(controller.counts().total(), 3);
    }

    #[test]
    fn test_invalid_item_goes_home_uncounted() {
        let signals = SorterSignals::new();
        let mut controller = booted(&signals);

        signals.post_classification(MaterialType::Invalid);
        controller.poll();
        assert_eq!(controller.display().row(1), "INVALID ITEM");

        signals.flag_item_at_exit();
        assert_eq!(
            controller.poll(),
            Some(Event::ItemSorted(MaterialType::Invalid))
        );
        assert_eq!(controller.tray().moves[0].target, 0);
        assert!(controller.tray().moves[0].is_noop());
        assert_eq!(controller.counts().total(), 0);
    }

    #[test]
    fn test_exit_with_empty_queue_faults() {
        let signals = SorterSignals::new();
        let mut controller = booted(&signals);

        signals.flag_item_at_exit();
        assert_eq!(
            controller.poll(),
            Some(Event::FaultDetected(FaultKind::QueueUnderflow))
        );
        assert_eq!(controller.mode(), Mode::Fault(FaultKind::QueueUnderflow));
        assert_eq!(controller.display().row(0), "ERROR: QUEUE");
        assert_eq!(controller.conveyor().state, ConveyorState::Disable);
        assert!(controller.tray().moves.is_empty());

        // Terminal
        signals.post_classification(MaterialType::Black);
        assert_eq!(controller.poll(), None);
    }

    #[test]
    fn test_queue_overflow_faults() {
        let signals = SorterSignals::new();
        let mut controller = booted(&signals);

        for _ in 0..crate::sorting::QUEUE_CAPACITY {
            signals.post_classification(MaterialType::Black);
            controller.poll();
        }
        assert_eq!(controller.mode(), Mode::Running);

        signals.post_classification(MaterialType::Black);
        assert_eq!(
            controller.poll(),
            Some(Event::FaultDetected(FaultKind::QueueOverflow))
        );
        assert!(controller.mode().is_terminal());
    }

    #[test]
    fn test_unhandled_interrupt_faults() {
        let signals = SorterSignals::new();
        let mut controller = booted(&signals);

        // Fault wins over everything else pending
        signals.post_classification(MaterialType::White);
        signals.raise_fault(FaultKind::UnhandledInterrupt);
        assert_eq!(
            controller.poll(),
            Some(Event::FaultDetected(FaultKind::UnhandledInterrupt))
        );
        assert_eq!(controller.display().row(0), "ERROR: BAD ISR!");
        assert_eq!(controller.queue_size(), 0);
    }

    #[test]
    fn test_pause_and_resume() {
        let signals = SorterSignals::new();
        let mut controller = booted(&signals);

        signals.post_classification(MaterialType::White);
        controller.poll();

        signals.toggle_pause();
        assert_eq!(controller.poll(), Some(Event::Pause));
        assert_eq!(controller.mode(), Mode::Paused);
        assert_eq!(controller.conveyor().state, ConveyorState::Stop);
        assert!(controller.display().saw("System Paused"));
        assert_eq!(controller.delay.total_ms, 20);

        // Count table: one white item still in flight
        assert_eq!(controller.display().row(0), "AL WH ST BL #OB");
        assert_eq!(controller.display().row(1), "00 00 00 00  01");

        // Sensor conditions stay pending while paused
        signals.flag_item_at_exit();
        assert_eq!(controller.poll(), None);
        assert_eq!(controller.poll(), None);

        signals.toggle_pause();
        assert_eq!(controller.poll(), Some(Event::Resume));
        assert_eq!(controller.mode(), Mode::Running);
        assert_eq!(controller.conveyor().state, ConveyorState::Start);
        assert_eq!(controller.display().row(0), "System Resumed");

        assert_eq!(controller.poll(), Some(Event::ItemSorted(MaterialType::White)));
    }

    #[test]
    fn test_ramp_down_waits_for_empty_belt() {
        let signals = SorterSignals::new();
        let mut controller = booted(&signals);

        signals.post_classification(MaterialType::Black);
        controller.poll();

        signals.arm_ramp_down();
        signals.fire_ramp_down();
        assert_eq!(controller.poll(), None);
        assert_eq!(controller.mode(), Mode::Running);

        signals.flag_item_at_exit();
        assert_eq!(controller.poll(), Some(Event::ItemSorted(MaterialType::Black)));

        assert_eq!(controller.poll(), Some(Event::RampDownComplete));
        assert_eq!(controller.mode(), Mode::Halted);
        assert!(controller.display().saw("Ramping down"));
        assert_eq!(controller.display().row(1), "00 00 00 01  00");
        assert_eq!(controller.delay.total_ms, 10);

        let history = &controller.conveyor().history;
        assert_eq!(
            history[history.len() - 2..],
            [ConveyorState::Stop, ConveyorState::Disable]
        );
    }

    #[test]
    fn test_halted_ignores_everything() {
        let signals = SorterSignals::new();
        let mut controller = booted(&signals);

        signals.fire_ramp_down();
        assert_eq!(controller.poll(), Some(Event::RampDownComplete));

        signals.post_classification(MaterialType::Steel);
        signals.flag_item_at_exit();
        signals.toggle_pause();
        signals.raise_fault(FaultKind::UnhandledInterrupt);
        assert_eq!(controller.poll(), None);
        assert_eq!(controller.mode(), Mode::Halted);
        assert_eq!(controller.conveyor().state, ConveyorState::Disable);
    }

    #[test]
    fn test_classification_before_exit() {
        let signals = SorterSignals::new();
        let mut controller = booted(&signals);

        signals.post_classification(MaterialType::Steel);
        controller.poll();

        // Both pending: the new item is queued before the old one exits
        signals.post_classification(MaterialType::Aluminum);
        signals.flag_item_at_exit();
        assert_eq!(
            controller.poll(),
            Some(Event::ItemClassified(MaterialType::Aluminum))
        );
        assert_eq!(controller.poll(), Some(Event::ItemSorted(MaterialType::Steel)));
        assert_eq!(controller.queue_size(), 1);
    }
}
