use std::error::Error;

use crate::api::models::ProductRecord;
use crate::api::ApiClient;
use crate::core::resource::Resource;

pub async fn run(client: &ApiClient, category: &str) -> Result<(), Box<dyn Error>> {
    let mut state = Resource::Loading;
    render(&state, category);

    state = Resource::from_result(client.fetch_products(category).await);
    render(&state, category);
    Ok(())
}

fn render(state: &Resource<Vec<ProductRecord>>, category: &str) {
    match state {
        Resource::Loading => println!("Loading products in '{category}'..."),
        Resource::Success(products) if products.is_empty() => {
            println!("No products in '{category}'.");
        }
        Resource::Success(products) => {
            for product in products {
                println!("{}: {} ₽", product.model, product.price);
                if !product.image_url.is_empty() {
                    println!("    {}", product.image_url);
                }
                // Sorted so repeated runs print the residual fields in a
                // stable order.
                let mut keys: Vec<&String> = product.details.keys().collect();
                keys.sort();
                for key in keys {
                    println!("    {}: {}", key, product.details[key]);
                }
            }
        }
        Resource::Error(message) => println!("Error: {message}"),
    }
}
