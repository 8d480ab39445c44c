use std::io::{self, BufRead, Stdout, StdinLock, Write};

use model::Route;

use crate::SelectionError;

/// What a chooser gets to see of each alternative.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteOption {
    pub summary: String,
    pub distance_km: f64,
}

impl From<&Route> for RouteOption {
    fn from(route: &Route) -> Self {
        Self {
            summary: route.summary.clone(),
            distance_km: route.distance() / 1000.0,
        }
    }
}

/// Picks one of several alternative routes.
pub trait RouteChooser {
    /// Returns an index into `options`.
    fn choose(&mut self, options: &[RouteOption]) -> Result<usize, SelectionError>;
}

/// Always takes the first alternative without asking.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstRouteChooser;

impl RouteChooser for FirstRouteChooser {
    fn choose(&mut self, _options: &[RouteOption]) -> Result<usize, SelectionError> {
        Ok(0)
    }
}

/// Lists the alternatives and asks until a valid number is entered.
pub struct TerminalRouteChooser<R, W> {
    input: R,
    output: W,
}

impl TerminalRouteChooser<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalRouteChooser<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> RouteChooser for TerminalRouteChooser<R, W> {
    fn choose(&mut self, options: &[RouteOption]) -> Result<usize, SelectionError> {
        writeln!(self.output, "Multiple routes found.\nChoose one:")?;
        for (index, option) in options.iter().enumerate() {
            writeln!(
                self.output,
                "  {}. {} ({:.2} km)",
                index, option.summary, option.distance_km
            )?;
        }
        let mut line = String::new();
        loop {
            write!(self.output, "Choose #: ")?;
            self.output.flush()?;
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Err(SelectionError::InputClosed);
            }
            match line.trim().parse::<usize>() {
                Ok(index) if index < options.len() => return Ok(index),
                _ => continue,
            }
        }
    }
}

/// Reduces the alternatives returned by a route source to exactly one.
///
/// With a single alternative, or with `force`, the first one is taken and the
/// chooser is not consulted.
pub fn select_route(
    mut routes: Vec<Route>,
    force: bool,
    chooser: &mut dyn RouteChooser,
) -> Result<Route, SelectionError> {
    if routes.is_empty() {
        return Err(SelectionError::NoRoutes);
    }
    let index = if force || routes.len() == 1 {
        0
    } else {
        let options = routes.iter().map(RouteOption::from).collect::<Vec<_>>();
        let index = chooser.choose(&options)?;
        if index >= routes.len() {
            return Err(SelectionError::OutOfRange {
                index,
                options: routes.len(),
            });
        }
        index
    };
    Ok(routes.swap_remove(index))
}
