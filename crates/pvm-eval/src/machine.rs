//! The reduction driver.
//!
//! A [`Machine`] owns the current node, the current environment and a step
//! counter. It repeatedly asks [`reduce`](crate::reduce) for the next state
//! until the node reaches normal form, reporting every state it passes
//! through to an [`Observer`].

use crate::config::MachineConfig;
use crate::error::{EvalError, EvalResult};
use crate::observer::Observer;
use crate::reduce::reduce_step;
use pvm_types::{Environment, Node};
use std::fmt;

/// A borrowed view of the machine between two steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State<'a> {
    pub step: u64,
    pub node: &'a Node,
    /// `None` when the machine runs in expression mode.
    pub environment: Option<&'a Environment>,
}

impl fmt::Display for State<'_> {
    /// `[<step>]: <node>` followed by `, <environment>` in statement mode.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]: {}", self.step, self.node)?;
        if let Some(env) = self.environment {
            write!(f, ", {env}")?;
        }
        Ok(())
    }
}

/// The final state of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// The normal form reached.
    pub node: Node,
    pub environment: Environment,
    /// Number of steps taken.
    pub steps: u64,
}

/// Small-step reduction machine.
#[derive(Debug, Clone)]
pub struct Machine {
    node: Node,
    environment: Environment,
    /// Whether the environment is part of the observed state.
    threaded: bool,
    steps: u64,
    config: MachineConfig,
}

impl Machine {
    /// Create a machine in expression mode: the environment starts empty and
    /// is left out of the trace. Any variable lookup fails.
    pub fn new(node: Node) -> Self {
        Self {
            node,
            environment: Environment::new(),
            threaded: false,
            steps: 0,
            config: MachineConfig::default(),
        }
    }

    /// Create a machine in statement mode, threading `environment` through
    /// the run.
    pub fn with_environment(node: Node, environment: Environment) -> Self {
        Self {
            node,
            environment,
            threaded: true,
            steps: 0,
            config: MachineConfig::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Steps taken so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Whether the current node is in normal form.
    pub fn is_done(&self) -> bool {
        !self.node.is_reducible()
    }

    pub fn state(&self) -> State<'_> {
        State {
            step: self.steps,
            node: &self.node,
            environment: self.threaded.then_some(&self.environment),
        }
    }

    /// Perform one reduction step.
    ///
    /// Fails with [`EvalError::Irreducible`] if the node is already in
    /// normal form, and with [`EvalError::StepLimitExceeded`] once the
    /// configured limit is reached. On error the machine keeps its previous
    /// state.
    pub fn step(&mut self) -> EvalResult<()> {
        if self.is_done() {
            return Err(EvalError::Irreducible(self.node.to_string()));
        }
        if self.steps >= self.config.step_limit {
            return Err(EvalError::StepLimitExceeded(self.config.step_limit));
        }
        let (node, environment) = reduce_step(&self.node, &self.environment, &self.config)?;
        self.node = node;
        if let Some(environment) = environment {
            self.environment = environment;
        }
        self.steps += 1;
        log::trace!(target: "pvm::machine", "step {} -> {}", self.steps, self.node);
        Ok(())
    }

    /// Run to normal form without observing intermediate states.
    pub fn run(&mut self) -> EvalResult<Outcome> {
        self.run_with(&mut |_: &State<'_>| {})
    }

    /// Run to normal form, reporting every state to `observer`, the initial
    /// and final ones included.
    pub fn run_with<O: Observer + ?Sized>(&mut self, observer: &mut O) -> EvalResult<Outcome> {
        log::debug!(target: "pvm::machine", "run started: {}", self.node);
        loop {
            observer.observe(&self.state());
            if self.is_done() {
                break;
            }
            if let Err(err) = self.step() {
                log::debug!(target: "pvm::machine", "run failed after {} steps: {err}", self.steps);
                return Err(err);
            }
        }
        log::debug!(
            target: "pvm::machine",
            "run finished after {} steps: {}",
            self.steps,
            self.node
        );
        Ok(Outcome {
            node: self.node.clone(),
            environment: self.environment.clone(),
            steps: self.steps,
        })
    }
}
