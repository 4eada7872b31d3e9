use std::env;
use std::path::Path;

use recipe_cart::scale::DEFAULT_TARGET_SERVINGS;
use recipe_cart::{process_recipe, render};

fn print_usage() {
    eprintln!("Usage: recipe-cart <url> [servings]");
    eprintln!();
    eprintln!("Example:");
    eprintln!("  recipe-cart https://www.bonappetit.com/recipe/loaded-scalloped-potatoes 7");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        None => {
            print_usage();
            std::process::exit(1);
        }
        Some("-h") | Some("--help") => {
            print_usage();
            return Ok(());
        }
        _ => {}
    }

    let url = &args[1];
    let servings = args
        .get(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_TARGET_SERVINGS);

    let list = process_recipe(url, servings).await?;
    let markdown = render::render_markdown(&list, url);

    let output_dir = Path::new("recipes");
    tokio::fs::create_dir_all(output_dir).await?;
    let filename = render::output_filename(&list.recipe.name);
    let output_path = output_dir.join(&filename);
    tokio::fs::write(&output_path, &markdown).await?;

    println!("{}", list.recipe.name);
    println!(
        "Scaled from {} to {} servings",
        list.original_servings, list.target_servings
    );
    println!("{} ingredients", list.items.len());
    println!("Saved to {}", output_path.display());

    Ok(())
}
