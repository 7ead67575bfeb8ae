use shape_search::search::Searcher;

fn main() {
    let mut args = pico_args::Arguments::from_env();
    let dump_path: Option<std::path::PathBuf> =
        args.opt_free_from_str().expect("Error parsing dump path");

    let now = std::time::Instant::now();

    let mut searcher = Searcher::new();
    searcher.run();

    println!("search time: {:?}", now.elapsed());
    searcher.summarize();

    if let Some(path) = dump_path {
        let set = searcher.into_results();
        set.save(&path).expect("Error writing dump");
        println!(
            "saved {} halves and {} shapes to {}",
            set.halves.len(),
            set.shapes.len(),
            path.display()
        );
    }
}
