use log::{debug, info, trace, warn};

use super::{
    device::{ControlLines, PortOpener},
    ControlLine, Error, Result, TouchConfig,
};

/// Performs the 1200bps touch
///
/// Opens the port with the configured framing, asserts RTS, deasserts DTR and closes the port.
/// Bootloaders that follow the convention reset (or enter programming mode) when they see this.
/// The port is released on every path out of [run](Self::run), including failures after open.
#[derive(Debug, Default)]
pub struct Touch<O: PortOpener> {
    opener: O,
    config: TouchConfig,
}

impl<O: PortOpener> Touch<O> {
    pub fn new(opener: O, config: TouchConfig) -> Self {
        Touch { opener, config }
    }

    pub fn config(&self) -> &TouchConfig {
        &self.config
    }

    /// Touch the device at `path`
    pub fn run(&mut self, path: &str) -> Result<()> {
        info!("Touching {} at {}", path, self.config);

        let port = self
            .opener
            .open(path, &self.config)
            .map_err(|e| Error::PortOpen(path.to_owned(), e.into()))?;
        let mut port = OpenPort::new(port);
        debug!("run: opened {}", path);

        port.set_line(ControlLine::Rts, true)?;
        port.set_line(ControlLine::Dtr, false)?;

        port.close()?;
        debug!("run: closed {}", path);
        Ok(())
    }
}

/// Owns a port for the duration of the sequence and closes it on drop if [close](Self::close) was
/// never reached
struct OpenPort<P: ControlLines> {
    port: Option<P>,
}

impl<P: ControlLines> OpenPort<P> {
    fn new(port: P) -> Self {
        OpenPort { port: Some(port) }
    }

    fn set_line(&mut self, line: ControlLine, level: bool) -> Result<()> {
        let port = self.port.as_mut().expect("port used after close");
        trace!("set_line: {} = {}", line, level);
        let result = match line {
            ControlLine::Rts => port.set_rts(level),
            ControlLine::Dtr => port.set_dtr(level),
        };
        result.map_err(|e| Error::ControlLine(line, e.into()))
    }

    fn close(mut self) -> Result<()> {
        match self.port.take() {
            Some(port) => port.close().map_err(|e| Error::Close(e.into())),
            None => Ok(()),
        }
    }
}

impl<P: ControlLines> Drop for OpenPort<P> {
    fn drop(&mut self) {
        if let Some(port) = self.port.take() {
            debug!("Releasing port after failed touch");
            if let Err(e) = port.close() {
                warn!("Could not close port after failed touch: {:?}", e);
            }
        }
    }
}

#[cfg(feature = "serialport_comm")]
/// Touch the device at `path` with the default 1200,N,1,8 framing
pub fn touch(path: &str) -> Result<()> {
    Touch::new(crate::device::SerialPortOpener, TouchConfig::default()).run(path)
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::{config::Parity, device};

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Open(String, TouchConfig),
        Rts(bool),
        Dtr(bool),
        Close,
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Step {
        Open,
        Rts,
        Dtr,
        Close,
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    #[derive(Default)]
    struct RecordingOpener {
        log: Log,
        fail_at: Option<Step>,
    }

    struct RecordingPort {
        log: Log,
        fail_at: Option<Step>,
    }

    impl RecordingOpener {
        fn failing_at(step: Step) -> Self {
            RecordingOpener {
                fail_at: Some(step),
                ..Default::default()
            }
        }

        fn events(&self) -> Vec<Event> {
            self.log.borrow().clone()
        }
    }

    fn check(fail_at: Option<Step>, step: Step) -> device::Result<()> {
        if fail_at == Some(step) {
            Err(device::Error::Communication(format!("{:?} failed", step)))
        } else {
            Ok(())
        }
    }

    impl PortOpener for RecordingOpener {
        type Port = RecordingPort;

        fn open(&mut self, path: &str, config: &TouchConfig) -> device::Result<RecordingPort> {
            check(self.fail_at, Step::Open)?;
            self.log
                .borrow_mut()
                .push(Event::Open(path.to_owned(), *config));
            Ok(RecordingPort {
                log: self.log.clone(),
                fail_at: self.fail_at,
            })
        }
    }

    impl ControlLines for RecordingPort {
        fn set_rts(&mut self, level: bool) -> device::Result<()> {
            check(self.fail_at, Step::Rts)?;
            self.log.borrow_mut().push(Event::Rts(level));
            Ok(())
        }

        fn set_dtr(&mut self, level: bool) -> device::Result<()> {
            check(self.fail_at, Step::Dtr)?;
            self.log.borrow_mut().push(Event::Dtr(level));
            Ok(())
        }

        fn close(self) -> device::Result<()> {
            self.log.borrow_mut().push(Event::Close);
            check(self.fail_at, Step::Close)
        }
    }

    fn run(opener: RecordingOpener, path: &str) -> (Result<()>, Vec<Event>) {
        let log = opener.log.clone();
        let result = Touch::new(opener, TouchConfig::default()).run(path);
        let events = log.borrow().clone();
        (result, events)
    }

    #[test]
    fn touch_sequence() {
        let (result, events) = run(RecordingOpener::default(), "/dev/ttyACM0");
        assert!(result.is_ok());
        assert_eq!(
            events,
            vec![
                Event::Open("/dev/ttyACM0".to_owned(), TouchConfig::default()),
                Event::Rts(true),
                Event::Dtr(false),
                Event::Close,
            ]
        );
    }

    #[test]
    fn custom_framing_is_passed_to_open() {
        let opener = RecordingOpener::default();
        let config = TouchConfig::default()
            .with_baud_rate(2400)
            .with_parity(Parity::Odd);
        let mut touch = Touch::new(opener, config);
        touch.run("COM3").unwrap();
        assert_eq!(touch.config(), &config);
        assert_eq!(
            touch.opener.events().first(),
            Some(&Event::Open("COM3".to_owned(), config))
        );
    }

    #[test]
    fn open_failure_writes_no_lines() {
        let (result, events) = run(RecordingOpener::failing_at(Step::Open), "/dev/does-not-exist");
        match result {
            Err(Error::PortOpen(path, _)) => assert_eq!(path, "/dev/does-not-exist"),
            other => panic!("expected PortOpen, got {:?}", other),
        }
        assert!(events.is_empty());
    }

    #[test]
    fn rts_failure_still_closes_port() {
        let (result, events) = run(RecordingOpener::failing_at(Step::Rts), "/dev/ttyACM0");
        assert!(matches!(
            result,
            Err(Error::ControlLine(ControlLine::Rts, _))
        ));
        assert_eq!(events.len(), 2);
        assert_eq!(events.last(), Some(&Event::Close));
    }

    #[test]
    fn dtr_failure_still_closes_port() {
        let (result, events) = run(RecordingOpener::failing_at(Step::Dtr), "/dev/ttyACM0");
        assert!(matches!(
            result,
            Err(Error::ControlLine(ControlLine::Dtr, _))
        ));
        assert_eq!(events[1..], [Event::Rts(true), Event::Close]);
    }

    #[test]
    fn guard_closes_exactly_once() {
        let mut opener = RecordingOpener::default();
        let port = opener.open("/dev/ttyACM0", &TouchConfig::default()).unwrap();
        let mut guard = OpenPort::new(port);
        guard.set_line(ControlLine::Dtr, true).unwrap();
        guard.close().unwrap();

        let port = opener.open("/dev/ttyACM0", &TouchConfig::default()).unwrap();
        drop(OpenPort::new(port));

        let closes = opener.events().iter().filter(|e| **e == Event::Close).count();
        assert_eq!(closes, 2);
    }

    #[test]
    fn close_failure_is_reported_once() {
        let (result, events) = run(RecordingOpener::failing_at(Step::Close), "/dev/ttyACM0");
        match result {
            Err(Error::Close(e)) => {
                assert!(matches!(e.inner(), device::Error::Communication(_)))
            }
            other => panic!("expected Close, got {:?}", other),
        }
        assert_eq!(
            events.iter().filter(|e| **e == Event::Close).count(),
            1
        );
    }
}
