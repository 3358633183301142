//! The Elm-architecture application loop: [`Model`], [`Driver`], [`Effect`],
//! [`App`], and [`AppRunner`] for back-ends that own their event loop.

use std::error::Error;
use std::sync::mpsc::{self, Receiver, Sender};

use crate::canvas::{compute_frame, Canvas, Frame};
use crate::messages::Msg;

// ---------------------------------------------------------------------------
// Effect
// ---------------------------------------------------------------------------

/// A side-effect returned by [`Model::update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Signal the application loop to stop.
    End,
}

// ---------------------------------------------------------------------------
// Model trait
// ---------------------------------------------------------------------------

/// The application model (Elm architecture).
pub trait Model {
    /// Process a message, optionally returning a side-effect.
    fn update(&mut self, msg: Msg) -> Option<Effect>;

    /// Render the current state into `canvas`.
    fn draw(&self, canvas: &mut Canvas);
}

// ---------------------------------------------------------------------------
// Driver traits
// ---------------------------------------------------------------------------

/// A polled back-end (e.g. a terminal).
pub trait Driver {
    /// Initialise the back-end.
    fn init(&mut self) -> Result<(), Box<dyn Error>>;

    /// Wait for input and send the resulting messages through `tx`.
    ///
    /// May return without sending anything (e.g. on a poll timeout).
    fn poll_msgs(&mut self, tx: &Sender<Msg>) -> Result<(), Box<dyn Error>>;

    /// Flush a computed frame to the screen.
    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn Error>>;

    /// Clean up / restore the screen.
    fn close(&mut self);
}

/// A back-end that owns the main-thread event loop (e.g. a native window).
///
/// It feeds input into the [`AppRunner`] and asks it for frames when it is
/// ready to paint.
pub trait EventLoopDriver {
    fn run(self, runner: AppRunner) -> Result<(), Box<dyn Error>>;
}

// ---------------------------------------------------------------------------
// AppRunner
// ---------------------------------------------------------------------------

/// Owns a model and its two canvases; turns messages into frame diffs.
pub struct AppRunner {
    model: Box<dyn Model>,
    prev: Canvas,
    curr: Canvas,
    quit: bool,
    dirty: bool,
}

impl AppRunner {
    pub fn new(model: Box<dyn Model>, width: i32, height: i32) -> Self {
        Self {
            model,
            prev: Canvas::new(0, 0),
            curr: Canvas::new(width, height),
            quit: false,
            dirty: true,
        }
    }

    /// Canvas size in cells.
    pub fn size(&self) -> (i32, i32) {
        (self.curr.width(), self.curr.height())
    }

    /// Deliver [`Msg::Init`] to the model.
    pub fn init(&mut self) {
        self.handle_msg(Msg::Init);
    }

    /// Deliver a message to the model. Ignored once the model has ended.
    pub fn handle_msg(&mut self, msg: Msg) {
        if self.quit {
            return;
        }
        if let Some(Effect::End) = self.model.update(msg) {
            log::debug!("model requested end");
            self.quit = true;
        }
        self.dirty = true;
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Redraw the model if something happened since the last frame and
    /// return the cells that changed.
    pub fn draw_frame(&mut self) -> Option<Frame> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        self.model.draw(&mut self.curr);
        let frame = compute_frame(&self.prev, &self.curr);
        self.prev.clone_from(&self.curr);
        (!frame.cells.is_empty()).then_some(frame)
    }

    /// Change the canvas size. The next frame covers the whole canvas.
    pub fn resize(&mut self, width: i32, height: i32) {
        if (width, height) == self.size() {
            return;
        }
        self.prev = Canvas::new(0, 0);
        self.curr = Canvas::new(width, height);
        self.dirty = true;
    }

    /// Forget what is on screen so that the next frame repaints everything.
    pub fn invalidate(&mut self) {
        self.prev = Canvas::new(0, 0);
        self.dirty = true;
    }
}

// ---------------------------------------------------------------------------
// AppConfig / App
// ---------------------------------------------------------------------------

/// Configuration for creating an [`App`].
pub struct AppConfig<M: Model + 'static, D: Driver> {
    pub model: M,
    pub driver: D,
    pub width: i32,
    pub height: i32,
}

/// The main application loop for polled drivers.
pub struct App<D: Driver> {
    runner: AppRunner,
    driver: D,
}

impl<D: Driver> App<D> {
    /// Create a new application from a configuration.
    pub fn new<M: Model + 'static>(config: AppConfig<M, D>) -> Self {
        Self {
            runner: AppRunner::new(Box::new(config.model), config.width, config.height),
            driver: config.driver,
        }
    }

    /// Run the main Model-View-Update loop.
    ///
    /// 1. Initialises the driver.
    /// 2. Sends `Msg::Init` through the model and paints the first frame.
    /// 3. Loops: poll, update, draw, diff, flush.
    /// 4. Stops when the model returns `Effect::End`.
    ///
    /// The driver is closed on every exit path.
    pub fn run(&mut self) -> Result<(), Box<dyn Error>> {
        self.driver.init()?;
        let result = self.event_loop();
        self.driver.close();
        result
    }

    fn event_loop(&mut self) -> Result<(), Box<dyn Error>> {
        let (tx, rx): (Sender<Msg>, Receiver<Msg>) = mpsc::channel();
        self.runner.init();
        self.flush()?;

        while !self.runner.should_quit() {
            self.driver.poll_msgs(&tx)?;
            while let Ok(msg) = rx.try_recv() {
                if let Msg::Screen { .. } = msg {
                    self.runner.invalidate();
                }
                self.runner.handle_msg(msg);
                if self.runner.should_quit() {
                    return Ok(());
                }
            }
            self.flush()?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Box<dyn Error>> {
        if let Some(frame) = self.runner.draw_frame() {
            self.driver.flush(frame)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::canvas::Point;
    use crate::messages::Key;

    /// Shows the number of key presses; ends on `q`.
    #[derive(Default)]
    struct Counter {
        presses: u32,
    }

    impl Model for Counter {
        fn update(&mut self, msg: Msg) -> Option<Effect> {
            match msg {
                Msg::KeyDown { key: Key::Char('q'), .. } | Msg::Quit => Some(Effect::End),
                Msg::KeyDown { .. } => {
                    self.presses += 1;
                    None
                }
                _ => None,
            }
        }

        fn draw(&self, canvas: &mut Canvas) {
            canvas.print(Point::ZERO, &self.presses.to_string(), Default::default());
        }
    }

    /// Replays scripted batches of messages and records flushed frames.
    struct Scripted {
        batches: VecDeque<Vec<Msg>>,
        frames: Vec<Frame>,
        closed: bool,
    }

    impl Scripted {
        fn new(batches: Vec<Vec<Msg>>) -> Self {
            Self {
                batches: batches.into(),
                frames: Vec::new(),
                closed: false,
            }
        }
    }

    impl Driver for &mut Scripted {
        fn init(&mut self) -> Result<(), Box<dyn Error>> {
            Ok(())
        }

        fn poll_msgs(&mut self, tx: &Sender<Msg>) -> Result<(), Box<dyn Error>> {
            let batch = self.batches.pop_front().ok_or("script exhausted")?;
            for msg in batch {
                tx.send(msg)?;
            }
            Ok(())
        }

        fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn Error>> {
            self.frames.push(frame);
            Ok(())
        }

        fn close(&mut self) {
            self.closed = true;
        }
    }

    #[test]
    fn runner_draws_only_changes() {
        let mut runner = AppRunner::new(Box::new(Counter::default()), 4, 1);
        runner.init();
        let first = runner.draw_frame().expect("first frame");
        assert_eq!(first.cells.len(), 4);
        assert!(runner.draw_frame().is_none());

        runner.handle_msg(Msg::key(Key::Space));
        let frame = runner.draw_frame().expect("changed");
        assert_eq!(frame.cells.len(), 1);
        assert_eq!(frame.cells[0].cell.ch, '1');
    }

    #[test]
    fn runner_stops_after_end() {
        let mut runner = AppRunner::new(Box::new(Counter::default()), 4, 1);
        runner.handle_msg(Msg::Quit);
        assert!(runner.should_quit());
        runner.handle_msg(Msg::key(Key::Space));
        runner.draw_frame();
        runner.handle_msg(Msg::key(Key::Space));
        assert!(runner.should_quit());
    }

    #[test]
    fn runner_resize_and_invalidate_repaint_everything() {
        let mut runner = AppRunner::new(Box::new(Counter::default()), 2, 1);
        runner.init();
        runner.draw_frame();
        runner.resize(3, 2);
        assert_eq!(runner.size(), (3, 2));
        assert_eq!(runner.draw_frame().map(|f| f.cells.len()), Some(6));
        runner.invalidate();
        assert_eq!(runner.draw_frame().map(|f| f.cells.len()), Some(6));
    }

    #[test]
    fn app_runs_until_end() {
        let mut driver = Scripted::new(vec![
            vec![Msg::key(Key::Space), Msg::key(Key::Space)],
            vec![],
            vec![Msg::key(Key::Char('q')), Msg::key(Key::Space)],
        ]);
        let mut app = App::new(AppConfig {
            model: Counter::default(),
            driver: &mut driver,
            width: 3,
            height: 1,
        });
        assert!(app.run().is_ok());
        assert!(driver.closed);
        assert!(driver.batches.is_empty());
        // Initial frame, then one after the first batch.
        assert_eq!(driver.frames.len(), 2);
        assert_eq!(driver.frames[1].cells[0].cell.ch, '2');
    }

    #[test]
    fn app_closes_driver_on_error() {
        let mut driver = Scripted::new(vec![vec![Msg::key(Key::Space)]]);
        let mut app = App::new(AppConfig {
            model: Counter::default(),
            driver: &mut driver,
            width: 3,
            height: 1,
        });
        assert!(app.run().is_err());
        assert!(driver.closed);
    }
}
