use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use ctxgen_core::{update, AppState, Effect, Msg, RequestState};
use ctxgen_logging::{ctx_debug, ctx_error};

use super::ui;

/// Input to the main loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopEvent {
    /// A full line from the user: capture it and submit.
    Submit(String),
    /// A message produced by the effect side.
    Dispatch(Msg),
    /// Input ended; exit once no request is pending.
    Quit,
}

/// Runs effects returned by `update`.
pub trait EffectExecutor {
    fn execute(&self, effects: Vec<Effect>);
}

pub struct Session<E: EffectExecutor, W: Write> {
    state: AppState,
    executor: E,
    out: W,
    interactive: bool,
}

impl<E: EffectExecutor, W: Write> Session<E, W> {
    pub fn new(state: AppState, executor: E, out: W, interactive: bool) -> Self {
        Self {
            state,
            executor,
            out,
            interactive,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let (state, effects) = update(self.state.clone(), msg);
        self.state = state;
        self.executor.execute(effects);
    }

    pub fn submit(&mut self, text: String) -> io::Result<()> {
        self.dispatch(Msg::InputChanged(text));
        self.dispatch(Msg::SubmitClicked);
        self.render()
    }

    pub fn handle(&mut self, event: LoopEvent) -> io::Result<()> {
        match event {
            LoopEvent::Submit(text) => self.submit(text),
            LoopEvent::Dispatch(msg) => {
                self.dispatch(msg);
                self.render()
            }
            LoopEvent::Quit => Ok(()),
        }
    }

    /// Writes the result region when the state changed since the last render.
    pub fn render(&mut self) -> io::Result<()> {
        if !self.state.consume_dirty() {
            return Ok(());
        }
        let view = self.state.view();
        for line in ui::render::render(&view) {
            writeln!(self.out, "{line}")?;
        }
        if self.interactive && !view.result.is_busy() {
            write!(self.out, "{}", ui::render::prompt(&view))?;
        }
        self.out.flush()
    }

    pub fn print_banner(&mut self) -> io::Result<()> {
        for line in ui::render::banner() {
            writeln!(self.out, "{line}")?;
        }
        write!(self.out, "{}", ui::render::prompt(&self.state.view()))?;
        self.out.flush()
    }
}

/// Prompt loop until input ends and the last request has settled.
pub fn run_interactive<E: EffectExecutor, W: Write>(
    session: &mut Session<E, W>,
    rx: &mpsc::Receiver<LoopEvent>,
) -> io::Result<()> {
    session.print_banner()?;
    let mut quitting = false;
    while let Ok(event) = rx.recv() {
        if event == LoopEvent::Quit {
            quitting = true;
        }
        session.handle(event)?;
        if quitting && !session.state().request().is_pending() {
            break;
        }
    }
    Ok(())
}

/// Submits `repo_url` once and waits for the outcome. Returns whether it succeeded.
pub fn run_once<E: EffectExecutor, W: Write>(
    session: &mut Session<E, W>,
    rx: &mpsc::Receiver<LoopEvent>,
    repo_url: String,
) -> io::Result<bool> {
    session.submit(repo_url)?;
    while session.state().request().is_pending() {
        match rx.recv() {
            Ok(LoopEvent::Dispatch(msg)) => {
                session.dispatch(msg);
                session.render()?;
            }
            Ok(_) => {}
            Err(_) => break,
        }
    }
    Ok(matches!(
        session.state().request(),
        RequestState::Success { .. }
    ))
}

/// Forwards stdin lines until EOF or `:quit`, then sends [`LoopEvent::Quit`].
pub fn spawn_stdin_reader(tx: mpsc::Sender<LoopEvent>) {
    thread::spawn(move || forward_lines(io::stdin().lock(), &tx));
}

fn forward_lines<R: BufRead>(reader: R, tx: &mpsc::Sender<LoopEvent>) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                ctx_error!("stdin read failed: {}", err);
                break;
            }
        };
        if matches!(line.trim(), ":quit" | ":q") {
            break;
        }
        if tx.send(LoopEvent::Submit(line)).is_err() {
            return;
        }
    }
    ctx_debug!("stdin closed");
    let _ = tx.send(LoopEvent::Quit);
}
