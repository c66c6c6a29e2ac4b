//! Driver loop: choose a pattern, seed a grid, evolve and display it

use super::{GenerationSink, PatternPrompt};
use crate::config::Settings;
use crate::game_of_life::{GameOfLifeRules, Grid, PatternLoader};
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{debug, info};

/// A grid together with the number of generations it has been evolved
#[derive(Debug, Clone)]
pub struct Simulation {
    grid: Grid,
    generation: usize,
}

impl Simulation {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            generation: 0,
        }
    }

    /// Advance one generation and return the new state
    pub fn step(&mut self) -> &Grid {
        GameOfLifeRules::evolve(&mut self.grid);
        self.generation += 1;
        &self.grid
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub pattern: String,
    pub generations: usize,
    pub final_population: usize,
}

/// Runs configured simulations
pub struct Runner {
    settings: Settings,
    loader: PatternLoader,
    padding: usize,
}

impl Runner {
    /// Dead cells added around the pattern when no padding is chosen
    pub const DEFAULT_PADDING: usize = 2;

    pub fn new(settings: Settings) -> Self {
        let loader = PatternLoader::from_settings(&settings);
        Self {
            settings,
            loader,
            padding: Self::DEFAULT_PADDING,
        }
    }

    /// Dead interior cells placed on every side of the pattern
    pub fn with_padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Load a pattern and embed it into a bordered grid
    pub fn initial_grid(&self, name: &str) -> Result<Grid> {
        let pattern = self
            .loader
            .load(name)
            .with_context(|| format!("Failed to load pattern '{}'", name))?;
        Ok(Grid::from_pattern(&pattern, self.padding))
    }

    /// Ask for a pattern, then evolve and show it `evolutions` times,
    /// waiting `delay_interval` between generations
    pub fn run<P, S>(&self, prompt: &mut P, sink: &mut S) -> Result<RunSummary>
    where
        P: PatternPrompt + ?Sized,
        S: GenerationSink + ?Sized,
    {
        self.settings
            .validate()
            .context("Configuration validation failed")?;

        let name = prompt.choose_pattern(&self.settings.patterns)?;
        let mut simulation = Simulation::new(self.initial_grid(&name)?);
        let delay = self.settings.delay();

        info!(
            pattern = %name,
            rows = simulation.grid().rows(),
            cols = simulation.grid().cols(),
            evolutions = self.settings.evolutions,
            "starting simulation"
        );

        for i in 0..self.settings.evolutions {
            if i > 0 {
                pause(delay);
            }
            simulation.step();
            debug!(
                generation = simulation.generation(),
                living = simulation.grid().living_count(),
                "evolved"
            );
            sink.show(simulation.generation(), simulation.grid())?;
        }

        let summary = RunSummary {
            pattern: name,
            generations: simulation.generation(),
            final_population: simulation.grid().living_count(),
        };
        info!(
            pattern = %summary.pattern,
            generations = summary.generations,
            population = summary.final_population,
            "simulation finished"
        );
        Ok(summary)
    }
}

fn pause(delay: Duration) {
    if !delay.is_zero() {
        std::thread::sleep(delay);
    }
}
