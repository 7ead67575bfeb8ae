use {
    shape_search::{lookup::Lookup, serialization::ShapeSet, shape::Shape},
    std::{path::PathBuf, process::ExitCode},
};

fn main() -> ExitCode {
    let mut args = pico_args::Arguments::from_env();
    let (dump_path, text): (PathBuf, String) = match (
        args.opt_free_from_str(),
        args.opt_free_from_str(),
    ) {
        (Ok(Some(dump_path)), Ok(Some(text))) => (dump_path, text),
        _ => {
            eprintln!("usage: lookup <dump.bin> <shape>");
            return ExitCode::FAILURE;
        }
    };

    let shape: Shape = match text.parse() {
        Ok(shape) => shape,
        Err(err) => {
            eprintln!("bad shape {text:?}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let set = ShapeSet::load(&dump_path).expect("Error reading dump");
    let lookup = Lookup::new(set);

    if lookup.creatable(shape) {
        println!("the shape is creatable");
    } else {
        println!("the shape is not creatable");
    }
    ExitCode::SUCCESS
}
