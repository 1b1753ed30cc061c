//! Product command handlers.

use anyhow::{Context, Result};
use comfy_table::{ContentArrangement, Table};
use shelf_core::catalog::{Product, display_price};
use shelf_core::config::Config;
use shelf_core::session::SessionStore;

use super::{api_failure, signed_in_client};

pub async fn list(config: &Config, json: bool) -> Result<()> {
    let store = SessionStore::default();
    let client = signed_in_client(config, &store)?;
    let products = client
        .list_products()
        .await
        .map_err(|err| api_failure(&store, err))?;

    if json {
        let out = serde_json::to_string_pretty(&products).context("encode products")?;
        println!("{out}");
    } else if products.is_empty() {
        println!("No products.");
    } else {
        println!("{}", product_table(&products));
    }
    Ok(())
}

pub async fn delete(config: &Config, id: &str) -> Result<()> {
    let store = SessionStore::default();
    let client = signed_in_client(config, &store)?;
    client
        .delete_product(id)
        .await
        .map_err(|err| api_failure(&store, err))
        .with_context(|| format!("delete product '{id}'"))?;
    println!("Deleted product {id}");
    Ok(())
}

fn product_table(products: &[Product]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(["ID", "Title", "Category", "Unit", "Origin", "Price", "Enabled"]);
    for product in products {
        table.add_row([
            product.id.clone(),
            product.title.clone(),
            product.category.clone(),
            product.unit.clone(),
            display_price(product.origin_price),
            display_price(product.price),
            if product.is_enabled { "yes" } else { "no" }.to_string(),
        ]);
    }
    table
}

