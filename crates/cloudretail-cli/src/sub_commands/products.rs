use anyhow::Result;
use cloudretail::catalog;

pub fn products() -> Result<()> {
    for product in catalog::builtin() {
        println!("{}: {} - {}", product.id, product.name, product.description);
    }

    Ok(())
}
