use std::time::Instant;

use log::info;

use aco_tsp_core::{
    ColonyConfig, ColonySearch, Error, Instance, Result, SolverOptions, logging, write_tour_to,
};

fn main() -> Result<()> {
    let now = Instant::now();
    let options = match SolverOptions::from_args() {
        Ok(options) => options,
        Err(Error::Usage(text)) => {
            print!("{text}");
            return Ok(());
        }
        Err(err) => return Err(err),
    };
    logging::init_logger(&options)?;

    let config = ColonyConfig::try_from(&options)?;
    let instance = match options.input_path() {
        Some(path) => Instance::from_path(path)?,
        None => Instance::from_stdin()?,
    };

    info!("options: {options}");
    info!("config: {config}");
    info!("input: n={}", instance.n());

    let outcome = ColonySearch::new(&instance, config)?.run()?;
    let best = outcome.tour();

    let name = options
        .input_path()
        .and_then(|path| path.file_stem())
        .map_or_else(|| String::from("stdin"), |stem| stem.to_string_lossy().into_owned());
    write_tour_to(options.output_path(), &name, best)?;

    info!(
        "output: n={} cost={:.4} time={:.2}s",
        best.len(),
        best.cost(),
        now.elapsed().as_secs_f32()
    );

    best.metrics(instance.cities());

    Ok(())
}
