//! Tilewall CLI — push saved layouts to a wall and drive video playback.

use std::path::Path;
use std::process;

use tilewall_core::space::Space;
use tilewall_core::WallConfig;


fn main() {
    let args: Vec<String> = std::env::args().collect();
    let arg_refs: Vec<&str> = args[1..].iter().map(|s| s.as_str()).collect();

    let cmd = match parse_args(&arg_refs) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("tilewall: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(cmd) {
        eprintln!("tilewall error: {}", e);
        process::exit(1);
    }
}


fn run(cmd: CliCommand) -> Result<(), String> {
    match cmd {
        CliCommand::Help => {
            println!("{}", help_text());
            Ok(())
        }
        CliCommand::Validate { file, opts } => {
            let mut space = build_space(&WallOpts { online: false, ..opts })?;
            let raw = std::fs::read_to_string(&file).map_err(|e| format!("{}: {}", file, e))?;
            space.load_json(&raw).map_err(|e| e.to_string())?;
            println!("{}: {} section(s)", file, space.sections().len());
            for section in space.sections() {
                let f = section.frame;
                println!("  {:<9} {}x{} at ({},{})", section.kind(), f.w, f.h, f.x, f.y);
            }
            Ok(())
        }
        CliCommand::Load { file, opts } => {
            let online = opts.online;
            let mut space = build_space(&opts)?;
            let raw = std::fs::read_to_string(&file).map_err(|e| format!("{}: {}", file, e))?;
            space.load_json(&raw).map_err(|e| e.to_string())?;
            println!(
                "loaded {} section(s) onto space '{}'{}",
                space.sections().len(),
                space.config().space_name,
                if online { "" } else { " (dry run; pass --online to push)" },
            );
            Ok(())
        }
        CliCommand::Clear { opts } => {
            let mut space = build_space(&opts)?;
            space.delete_sections();
            println!("cleared all sections on space '{}'", space.config().space_name);
            Ok(())
        }
        CliCommand::Video { op, opts } => {
            let space = build_space(&opts)?;
            let videos = space.videos();
            match op {
                VideoOp::Play => videos.play(None),
                VideoOp::Pause => videos.pause(None),
                VideoOp::Stop => videos.stop(None),
                VideoOp::Seek(time) => videos.seek(time, None),
            }
            Ok(())
        }
    }
}


fn build_space(opts: &WallOpts) -> Result<Space, String> {
    let mut config = match &opts.config {
        Some(path) => {
            WallConfig::from_yaml_file(Path::new(path)).map_err(|e| e.to_string())?
        }
        None => WallConfig::local("Local"),
    };
    if let Some(host) = &opts.host {
        config = WallConfig::new(host, &config.space_name, config.ports, config.geometry);
    }
    if let Some(space_name) = &opts.space {
        config.space_name = space_name.clone();
    }
    let mut space = Space::new(config);
    if opts.online {
        space.enable_online_mode();
    }
    Ok(space)
}


#[derive(Debug, Clone, PartialEq, Default)]
struct WallOpts {
    host: Option<String>,
    space: Option<String>,
    config: Option<String>,
    online: bool,
}

#[derive(Debug, Clone, PartialEq)]
enum VideoOp {
    Play,
    Pause,
    Stop,
    Seek(f64),
}

#[derive(Debug, Clone, PartialEq)]
enum CliCommand {
    Validate { file: String, opts: WallOpts },
    Load { file: String, opts: WallOpts },
    Clear { opts: WallOpts },
    Video { op: VideoOp, opts: WallOpts },
    Help,
}


fn parse_args(args: &[&str]) -> Result<CliCommand, String> {
    if args.is_empty() {
        return Err("No command specified. Run 'tilewall help' for usage.".into());
    }

    match args[0] {
        "validate" => {
            if args.len() < 2 || args[1].starts_with("--") {
                return Err("Usage: tilewall validate <layout.json> [options]".into());
            }
            Ok(CliCommand::Validate {
                file: args[1].into(),
                opts: parse_opts(args),
            })
        }
        "load" => {
            if args.len() < 2 || args[1].starts_with("--") {
                return Err("Usage: tilewall load <layout.json> [options]".into());
            }
            Ok(CliCommand::Load {
                file: args[1].into(),
                opts: parse_opts(args),
            })
        }
        "clear" => Ok(CliCommand::Clear {
            opts: parse_opts(args),
        }),
        "video" => parse_video(args),
        "help" => Ok(CliCommand::Help),
        _ => Err(format!(
            "Unknown command: '{}'. Run 'tilewall help' for usage.",
            args[0]
        )),
    }
}


fn parse_video(args: &[&str]) -> Result<CliCommand, String> {
    if args.len() < 2 {
        return Err("Usage: tilewall video <play|pause|stop|seek> ...".into());
    }
    let op = match args[1] {
        "play" => VideoOp::Play,
        "pause" => VideoOp::Pause,
        "stop" => VideoOp::Stop,
        "seek" => {
            let raw = args.get(2).ok_or("Usage: tilewall video seek <seconds>")?;
            let time = raw
                .parse::<f64>()
                .map_err(|_| format!("invalid seek time: '{}'", raw))?;
            VideoOp::Seek(time)
        }
        other => return Err(format!("Unknown video subcommand: '{}'", other)),
    };
    Ok(CliCommand::Video {
        op,
        opts: parse_opts(args),
    })
}


fn parse_opts(args: &[&str]) -> WallOpts {
    WallOpts {
        host: find_flag(args, "--host"),
        space: find_flag(args, "--space"),
        config: find_flag(args, "--config"),
        online: args.contains(&"--online"),
    }
}


fn find_flag(args: &[&str], flag: &str) -> Option<String> {
    for (i, arg) in args.iter().enumerate() {
        if *arg == flag {
            return args.get(i + 1).map(|s| s.to_string());
        }
    }
    None
}


fn help_text() -> String {
    "\
tilewall — display wall control client

Usage: tilewall <command> [args...]

Commands:
  validate <layout.json> [options]   Parse a layout file and list its sections
  load <layout.json> [options]       Push a layout file to the wall
  clear [options]                    Delete every section on the wall
  video <play|pause|stop> [options]  Control video playback wall-wide
  video seek <seconds> [options]     Seek every playing video
  help                               Show this help

Options:
  --host <host>      Wall service host (default: localhost)
  --space <name>     Target space name (default: Local)
  --config <file>    YAML wall configuration bundle
  --online           Actually issue requests (default is a dry run)"
        .into()
}
