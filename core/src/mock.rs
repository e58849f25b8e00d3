//! Test doubles for the collaborator traits

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType as PinErrorType, OutputPin};
use embedded_io::{ErrorKind, ErrorType, Read, Write};
use weather_hal::{
    CalendarTime, Clock, Connection, Connector, Endpoint, EnvironmentSensor, Link, LinkStatus,
    RawMeasurement, TimeSource,
};

/// Transport error carrying a fixed kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockIoError(pub ErrorKind);

impl fmt::Display for MockIoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl std::error::Error for MockIoError {}

impl embedded_io::Error for MockIoError {
    fn kind(&self) -> ErrorKind {
        self.0
    }
}

/// What the collector sends back on one connection
#[derive(Debug, Clone)]
pub enum Reply {
    /// Whatever was written
    Echo,
    /// Fixed bytes, then end of stream
    Bytes(Vec<u8>),
    /// Every read fails
    Fail(ErrorKind),
}

/// Behaviour of one accepted connection
#[derive(Debug, Clone)]
pub struct Session {
    write_error: Option<ErrorKind>,
    reply: Reply,
    chunk: usize,
}

impl Session {
    pub fn echo() -> Self {
        Self {
            write_error: None,
            reply: Reply::Echo,
            chunk: usize::MAX,
        }
    }

    pub fn reply(bytes: &[u8]) -> Self {
        Self {
            reply: Reply::Bytes(bytes.to_vec()),
            ..Self::echo()
        }
    }

    pub fn read_error(kind: ErrorKind) -> Self {
        Self {
            reply: Reply::Fail(kind),
            ..Self::echo()
        }
    }

    pub fn with_write_error(mut self, kind: ErrorKind) -> Self {
        self.write_error = Some(kind);
        self
    }

    /// Deliver the reply at most `n` bytes per read
    pub fn chunked(mut self, n: usize) -> Self {
        self.chunk = n;
        self
    }
}

/// Outcome of one connect call
#[derive(Debug, Clone)]
pub enum Dial {
    Refuse(ErrorKind),
    Accept(Session),
}

/// Everything the fake transport observed
#[derive(Debug, Default)]
pub struct TransportLog {
    pub dials: usize,
    pub refused: usize,
    /// Bytes written on each closed connection, in close order
    pub sent: Vec<Vec<u8>>,
    pub reads: usize,
    pub closes: usize,
}

pub struct MockConnector {
    script: VecDeque<Dial>,
    fallback: Dial,
    log: Rc<RefCell<TransportLog>>,
}

impl MockConnector {
    /// Play `script` in order, then answer every further dial with `fallback`
    pub fn scripted(script: impl IntoIterator<Item = Dial>, fallback: Dial) -> Self {
        Self {
            script: script.into_iter().collect(),
            fallback,
            log: Rc::default(),
        }
    }

    pub fn always(dial: Dial) -> Self {
        Self::scripted(std::iter::empty(), dial)
    }

    pub fn log(&self) -> Rc<RefCell<TransportLog>> {
        Rc::clone(&self.log)
    }
}

impl Connector for MockConnector {
    type Error = MockIoError;
    type Connection = MockConnection;

    fn connect(&mut self, _endpoint: &Endpoint) -> Result<MockConnection, MockIoError> {
        let dial = self
            .script
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        self.log.borrow_mut().dials += 1;
        match dial {
            Dial::Refuse(kind) => {
                self.log.borrow_mut().refused += 1;
                Err(MockIoError(kind))
            }
            Dial::Accept(session) => Ok(MockConnection {
                session,
                written: Vec::new(),
                read_pos: 0,
                log: Rc::clone(&self.log),
            }),
        }
    }
}

pub struct MockConnection {
    session: Session,
    written: Vec<u8>,
    read_pos: usize,
    log: Rc<RefCell<TransportLog>>,
}

impl ErrorType for MockConnection {
    type Error = MockIoError;
}

impl Read for MockConnection {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, MockIoError> {
        self.log.borrow_mut().reads += 1;
        let data: &[u8] = match &self.session.reply {
            Reply::Echo => &self.written,
            Reply::Bytes(bytes) => bytes,
            Reply::Fail(kind) => return Err(MockIoError(*kind)),
        };
        let remaining = &data[self.read_pos.min(data.len())..];
        let n = remaining.len().min(buf.len()).min(self.session.chunk);
        buf[..n].copy_from_slice(&remaining[..n]);
        self.read_pos += n;
        Ok(n)
    }
}

impl Write for MockConnection {
    fn write(&mut self, buf: &[u8]) -> Result<usize, MockIoError> {
        if let Some(kind) = self.session.write_error {
            return Err(MockIoError(kind));
        }
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), MockIoError> {
        Ok(())
    }
}

impl Connection for MockConnection {
    fn close(self) {
        let mut log = self.log.borrow_mut();
        log.closes += 1;
        log.sent.push(self.written);
    }
}

/// Records requested sleep time instead of sleeping; clones share the total
#[derive(Debug, Clone, Default)]
pub struct MockDelay {
    slept_ns: Rc<Cell<u64>>,
}

impl MockDelay {
    pub fn total_ms(&self) -> u64 {
        self.slept_ns.get() / 1_000_000
    }

    fn add(&self, ns: u64) {
        self.slept_ns.set(self.slept_ns.get() + ns);
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.add(u64::from(ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.add(u64::from(us) * 1_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.add(u64::from(ms) * 1_000_000);
    }
}

/// Output pin recording every level it was driven to; clones share history
#[derive(Debug, Clone, Default)]
pub struct MockPin {
    levels: Rc<RefCell<Vec<bool>>>,
}

impl MockPin {
    /// Number of times the pin was driven high
    pub fn highs(&self) -> usize {
        self.levels.borrow().iter().filter(|high| **high).count()
    }

    pub fn is_on(&self) -> bool {
        self.levels.borrow().last().copied().unwrap_or(false)
    }
}

impl PinErrorType for MockPin {
    type Error = core::convert::Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.levels.borrow_mut().push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.levels.borrow_mut().push(true);
        Ok(())
    }
}

#[derive(Debug)]
pub struct SensorFault;

pub struct MockSensor {
    measurement: Option<RawMeasurement>,
    pub reads: usize,
}

impl MockSensor {
    pub fn reading(temperature_c: f32, pressure_pa: f32, humidity_rh: f32) -> Self {
        Self {
            measurement: Some(RawMeasurement {
                temperature_c,
                pressure_pa,
                humidity_rh,
            }),
            reads: 0,
        }
    }

    pub fn failing() -> Self {
        Self {
            measurement: None,
            reads: 0,
        }
    }
}

impl EnvironmentSensor for MockSensor {
    type Error = SensorFault;

    fn measure(&mut self) -> Result<RawMeasurement, SensorFault> {
        self.reads += 1;
        self.measurement.ok_or(SensorFault)
    }
}

/// Replays a sequence of times, then keeps reporting the last one
pub struct MockClock {
    times: VecDeque<CalendarTime>,
    last: CalendarTime,
}

impl MockClock {
    pub fn sequence(times: impl IntoIterator<Item = CalendarTime>) -> Self {
        let times: VecDeque<_> = times.into_iter().collect();
        let last = times
            .back()
            .copied()
            .unwrap_or(CalendarTime::new(2000, 1, 1, 0, 0, 0));
        Self { times, last }
    }
}

impl Clock for MockClock {
    fn now(&mut self) -> CalendarTime {
        self.times.pop_front().unwrap_or(self.last)
    }
}

/// Link that walks through a fixed list of statuses
pub struct MockLink {
    statuses: VecDeque<LinkStatus>,
    associate_fails: bool,
    pub associations: usize,
    pub polls: usize,
}

impl MockLink {
    /// Report `statuses` in order; the last one repeats forever
    pub fn new(statuses: impl IntoIterator<Item = LinkStatus>) -> Self {
        Self {
            statuses: statuses.into_iter().collect(),
            associate_fails: false,
            associations: 0,
            polls: 0,
        }
    }

    pub fn failing_association(mut self) -> Self {
        self.associate_fails = true;
        self
    }
}

impl Link for MockLink {
    type Error = ();

    fn associate(&mut self) -> Result<(), ()> {
        self.associations += 1;
        if self.associate_fails {
            Err(())
        } else {
            Ok(())
        }
    }

    fn status(&mut self) -> LinkStatus {
        self.polls += 1;
        if self.statuses.len() > 1 {
            self.statuses.pop_front().unwrap_or(LinkStatus::Failed)
        } else {
            self.statuses.front().copied().unwrap_or(LinkStatus::Failed)
        }
    }
}

pub struct MockTimeSource {
    fails: bool,
    pub syncs: usize,
}

impl MockTimeSource {
    pub fn ok() -> Self {
        Self {
            fails: false,
            syncs: 0,
        }
    }

    pub fn failing() -> Self {
        Self {
            fails: true,
            syncs: 0,
        }
    }
}

impl TimeSource for MockTimeSource {
    type Error = ();

    fn synchronize(&mut self) -> Result<(), ()> {
        self.syncs += 1;
        if self.fails {
            Err(())
        } else {
            Ok(())
        }
    }
}
