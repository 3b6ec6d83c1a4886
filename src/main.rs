#![deny(clippy::all)]

use clap::{App, Arg, ArgMatches};
use log::{error, info};
use meshtrace::{Mesh, RenderError, RenderOptions, Renderer, Scene};
use std::fs::File;
use std::path::Path;
use std::process;
use std::str::FromStr;
use std::time::Instant;

fn parse_arg<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<Option<T>, RenderError> {
    matches
        .value_of(name)
        .map(|value| {
            value.parse().map_err(|_| {
                RenderError::Config(format!("invalid value {:?} for --{}", value, name))
            })
        })
        .transpose()
}

fn load_options(matches: &ArgMatches) -> Result<RenderOptions, RenderError> {
    let mut options = match matches.value_of("config") {
        Some(config) => {
            let path = Path::new(config);
            let file = File::open(path).map_err(|source| RenderError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            RenderOptions::from_reader(file)?
        }
        None => RenderOptions::default(),
    };

    if let Some(width) = parse_arg(matches, "width")? {
        options.width = width;
    }
    if let Some(height) = parse_arg(matches, "height")? {
        options.height = height;
    }
    if let Some(threads) = parse_arg(matches, "threads")? {
        options.threads = Some(threads);
    }
    options.validate()?;

    Ok(options)
}

fn run(matches: &ArgMatches) -> Result<(), RenderError> {
    let options = load_options(matches)?;
    let mesh_path = Path::new(matches.value_of("mesh").unwrap_or_default());
    let output_filename = matches.value_of("output").unwrap_or("out.png");
    let use_progress = !matches.is_present("noprogress");

    let now = Instant::now();
    let mesh = Mesh::load(mesh_path)?;
    info!("Took {:?} to load mesh.", now.elapsed());

    let now = Instant::now();
    let scene = Scene::from_mesh(&mesh);
    info!(
        "Took {:?} to pre-process {} triangles.",
        now.elapsed(),
        scene.len()
    );

    let renderer = Renderer::new(options, scene);
    let (framebuffer, duration) = renderer.render(use_progress)?;
    framebuffer.save(Path::new(output_filename))?;
    info!("Output written to {} in {:.3?}", output_filename, duration);

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = App::new("meshtrace")
        .about("Renders a triangle mesh with shadows and mirror reflections")
        .arg(
            Arg::with_name("mesh")
                .index(1)
                .required(true)
                .takes_value(true)
                .help("input mesh with `v x y z` and `f a b c` lines"),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .help("Output rendered image to file [default: out.png]"),
        )
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .takes_value(true)
                .help("render options as a json file"),
        )
        .arg(
            Arg::with_name("width")
                .long("width")
                .takes_value(true)
                .help("Override the output width"),
        )
        .arg(
            Arg::with_name("height")
                .long("height")
                .takes_value(true)
                .help("Override the output height"),
        )
        .arg(
            Arg::with_name("threads")
                .short("j")
                .long("threads")
                .takes_value(true)
                .help("Number of render threads [default: one per core]"),
        )
        .arg(
            Arg::with_name("noprogress")
                .long("no-progress")
                .help("Hide progress bar"),
        )
        .get_matches();

    if let Err(error) = run(&matches) {
        error!("{}", error);
        process::exit(1);
    }
}
