use recipe_cart::{fetch_recipe, process_recipe};

fn create_recipe_html(json_ld: &str) -> String {
    format!(
        r#"
        <!DOCTYPE html>
        <html>
        <head>
            <title>Recipe Page</title>
            <script type="application/ld+json">
                {}
            </script>
        </head>
        <body>
            <h1>Recipe</h1>
        </body>
        </html>
        "#,
        json_ld
    )
}

const POTATO_JSON_LD: &str = r#"
{
    "@context": "https://schema.org",
    "@type": "Recipe",
    "name": "Loaded Scalloped Potatoes",
    "description": "Rich and cheesy",
    "image": "https://example.com/potatoes.jpg",
    "recipeIngredient": [
        "2 cups heavy cream",
        "1 1/2 lbs potatoes, peeled",
        "½ cup grated parmesan (freshly grated)",
        "chives for garnish"
    ],
    "recipeInstructions": ["Slice the potatoes", "Layer with cream", "Bake until golden"],
    "recipeYield": "4 servings",
    "totalTime": "PT1H30M"
}
"#;

#[tokio::test]
async fn test_fetch_recipe_from_json_ld_page() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/recipe")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(create_recipe_html(POTATO_JSON_LD))
        .create();

    let url = format!("{}/recipe", server.url());
    let recipe = fetch_recipe(&url).await.unwrap();

    assert_eq!(recipe.name, "Loaded Scalloped Potatoes");
    assert_eq!(recipe.ingredients.len(), 4);
    assert_eq!(recipe.yields, "4 servings");
    assert_eq!(recipe.total_time_minutes, Some(90));
}

#[tokio::test]
async fn test_process_recipe_scales_and_parses() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/recipe")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(create_recipe_html(POTATO_JSON_LD))
        .create();

    let url = format!("{}/recipe", server.url());
    let list = process_recipe(&url, 8).await.unwrap();

    assert_eq!(list.original_servings, 4);
    assert_eq!(list.target_servings, 8);

    // "2 cups heavy cream" doubled
    let cream = &list.items[0];
    assert_eq!(cream.ingredient.unit, "cups");
    assert_eq!(cream.ingredient.name, "heavy cream");
    assert_eq!(cream.scaled_amount, 4.0);

    // "1 1/2 lbs potatoes, peeled" - mixed number, comma suffix stripped
    let potatoes = &list.items[1];
    assert_eq!(potatoes.ingredient.amount, 1.5);
    assert_eq!(potatoes.ingredient.unit, "lbs");
    assert_eq!(potatoes.ingredient.search_name, "potatoes");
    assert_eq!(potatoes.scaled_amount, 3.0);

    // "½ cup grated parmesan (freshly grated)" - unicode fraction, parens stripped
    let parmesan = &list.items[2];
    assert_eq!(parmesan.ingredient.amount, 0.5);
    assert_eq!(parmesan.ingredient.search_name, "grated parmesan");
    assert_eq!(parmesan.scaled_amount, 1.0);

    // "chives for garnish" - no amount, stays zero
    let chives = &list.items[3];
    assert_eq!(chives.ingredient.amount, 0.0);
    assert_eq!(chives.scaled_amount, 0.0);
}

#[tokio::test]
async fn test_no_recipe_on_page() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/empty")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<html><body><p>Nothing here</p></body></html>")
        .create();

    let url = format!("{}/empty", server.url());
    let result = fetch_recipe(&url).await;
    assert!(result.is_err());
}
