mod args;
mod error;

use std::process::ExitCode;

use clap::Parser;
use google_maps::GoogleMapsClient;
use model::{Route, RouteState, Trajectory};
use simulator::{
    build_trajectory, progress::TerminalProgress, select_route, FirstRouteChooser, Replay,
    RouteChooser, RouteSource, SimulationConfig, SystemClock, TerminalRouteChooser,
};
use tokio_util::sync::CancellationToken;
use tracking::{client::banner, provision, RouteTelemetry, TrackingClient};
use utility::duration;

use crate::{args::Args, error::CliError};

fn log_driving_summary(route: &Route, trajectory: &Trajectory, config: &SimulationConfig) {
    let wall_duration =
        duration::from_secs_f64(trajectory.total_duration() / config.speed_factor);
    let average_speed = if trajectory.total_duration() > 0.0 {
        route.distance() / trajectory.total_duration() * 3.6
    } else {
        0.0
    };
    log::info!(
        "{}\nDuration {}, Distance {:.2} km, Avg. speed {:.2} km/h",
        banner("DRIVING"),
        duration::format_hms(&wall_duration),
        route.distance() / 1000.0,
        average_speed
    );
}

async fn run(args: Args) -> Result<(), CliError> {
    let config = args.simulation_config()?;

    /* route */
    let google_maps = GoogleMapsClient::new(&args.google_maps_credentials()?);
    let routes = google_maps.lookup_route(&args.start, &args.end, true).await?;
    let route = {
        let mut chooser: Box<dyn RouteChooser> = if args.non_interactive {
            Box::new(FirstRouteChooser)
        } else {
            Box::new(TerminalRouteChooser::stdio())
        };
        select_route(routes, args.non_interactive, chooser.as_mut())?
    };
    let trajectory = build_trajectory(&route, config.timing)?;

    /* tracking service */
    let tracking = TrackingClient::new(&args.server)?;
    log::info!("{}", tracking.base_url());
    let provisioned = provision(
        &tracking,
        &args.superuser()?,
        args.user()?,
        &mut rand::rng(),
    )
    .await?;
    tracking
        .transition_route_state(&provisioned.token, &provisioned.route_id, RouteState::Active)
        .await?;

    /* drive */
    log_driving_summary(&route, &trajectory, &config);
    let cancel = CancellationToken::new();
    let interrupt = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        }
    });
    let telemetry = RouteTelemetry::new(
        tracking.clone(),
        provisioned.token.clone(),
        provisioned.route_id.clone(),
    );
    let replayed = Replay::new(&trajectory, &config)
        .run(
            &SystemClock,
            &telemetry,
            &mut TerminalProgress::stdout(),
            &cancel,
        )
        .await;
    interrupt.abort();
    replayed?;

    tracking
        .transition_route_state(
            &provisioned.token,
            &provisioned.route_id,
            RouteState::Complete,
        )
        .await?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
