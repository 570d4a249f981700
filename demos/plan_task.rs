//! Builds a three-turnpoint AAT, prints its geometry and the glide numbers
//! for the configured polar.
//!
//! Pass a JSON task behaviour as the first argument to override the
//! defaults, e.g. `'{"contest_nationality": "american"}'`. Set `RUST_LOG`
//! to `debug` to follow the factory decisions.

use soaring_task::task::create_task_factory;
use soaring_task::{
    Angle, GeoPoint, GeoVector, OrderedTask, PolarSettings, ProtectedTaskManager, TaskBehaviour, TaskFactoryType,
    TaskManager, Waypoint,
};
use std::env;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let behaviour: TaskBehaviour = match env::args().nth(1) {
        Some(json) => serde_json::from_str(&json)?,
        None => TaskBehaviour::default(),
    };

    let home = GeoPoint::degrees(9.43, 47.88);
    let waypoints = [
        Waypoint::new(0, "Home", home),
        Waypoint::new(1, "North", GeoVector::new(90_000.0, Angle::degrees(15.0)).end_point(&home)),
        Waypoint::new(2, "East", GeoVector::new(110_000.0, Angle::degrees(95.0)).end_point(&home)),
        Waypoint::new(3, "South", GeoVector::new(60_000.0, Angle::degrees(170.0)).end_point(&home)),
    ];

    let factory = create_task_factory(TaskFactoryType::Aat, &behaviour);
    let mut task = OrderedTask::with_factory(factory.kind(), behaviour);
    for waypoint in waypoints.iter().chain([&waypoints[0]]) {
        let point = task
            .create_intermediate(waypoint.clone())
            .ok_or("no intermediate point type available")?;
        task.append(point, true)?;
    }
    task.check_add_finish();

    let manager = ProtectedTaskManager::new(TaskManager::new(behaviour));
    {
        let mut lease = manager.exclusive_lease();
        lease.set_glide_polar(PolarSettings::default().glide_polar(1.5));
        lease.commit(&task)?;
    }

    for index in 1..task.len() - 1 {
        manager.set_target(index, 0.5, Angle::ZERO)?;
    }

    let lease = manager.lease();
    let task = lease.ordered_task();
    println!("=== {:?} task ({:?} rules) ===", task.factory_kind(), behaviour.contest_nationality);
    for (i, point) in task.points().iter().enumerate() {
        println!(
            "{}. {:<6} {:?} {:?}",
            i + 1,
            point.waypoint().name,
            point.kind(),
            point.factory_type()
        );
        if let Some(target) = point.target_location() {
            println!(
                "   target {:.4} {:.4}",
                target.longitude.to_degrees(),
                target.latitude.to_degrees()
            );
        }
    }
    println!("Nominal distance: {:.1} km", task.nominal_distance() / 1000.0);
    println!("Scored distance:  {:.1} km", task.scored_nominal_distance() / 1000.0);

    let report = task.validate();
    println!("Valid: {} {:?}", report.valid, report.errors);

    let polar = lease.glide_polar();
    println!("\n=== Glide polar (MC {:.1} m/s) ===", polar.mc());
    println!("Best L/D: {:.1} at {:.0} km/h", polar.best_ld(), polar.v_best_ld() * 3.6);
    println!("Min sink: {:.2} m/s at {:.0} km/h", polar.s_min(), polar.v_min() * 3.6);

    Ok(())
}
