//! Catalog seed command.
//!
//! Upserts the bakery's categories and products keyed by slug, so the
//! command is safe to re-run. Prices are in centavos.

use sqlx::PgPool;

use super::CliError;

struct SeedCategory {
    name: &'static str,
    slug: &'static str,
    description: &'static str,
}

struct SeedProduct {
    name: &'static str,
    slug: &'static str,
    description: &'static str,
    price: i64,
    category_slug: &'static str,
    stock: i32,
    image_url: &'static str,
}

const CATEGORIES: &[SeedCategory] = &[
    SeedCategory {
        name: "Clássicos",
        slug: "classicos",
        description: "Sabores tradicionais e atemporais",
    },
    SeedCategory {
        name: "Frutas",
        slug: "frutas",
        description: "Cupcakes com sabores de frutas frescas",
    },
    SeedCategory {
        name: "Chocolate",
        slug: "chocolate",
        description: "Para os amantes de chocolate",
    },
    SeedCategory {
        name: "Especiais",
        slug: "especiais",
        description: "Sabores únicos e exclusivos",
    },
    SeedCategory {
        name: "Veganos",
        slug: "veganos",
        description: "Opções 100% veganas",
    },
];

const PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        name: "Cupcake de Morango",
        slug: "cupcake-morango",
        description: "Delicioso cupcake com cobertura de morango fresco e chantilly",
        price: 1200,
        category_slug: "frutas",
        stock: 50,
        image_url: "https://images.unsplash.com/photo-1614707267537-b85aaf00c4b7?w=500",
    },
    SeedProduct {
        name: "Cupcake de Chocolate Belga",
        slug: "cupcake-chocolate-belga",
        description: "Massa de chocolate com cobertura cremosa de chocolate belga",
        price: 1400,
        category_slug: "chocolate",
        stock: 45,
        image_url: "https://images.unsplash.com/photo-1587668178277-295251f900ce?w=500",
    },
    SeedProduct {
        name: "Cupcake de Baunilha",
        slug: "cupcake-baunilha",
        description: "Clássico cupcake de baunilha com buttercream suave",
        price: 1000,
        category_slug: "classicos",
        stock: 60,
        image_url: "https://images.unsplash.com/photo-1576618148400-f54bed99fcfd?w=500",
    },
    SeedProduct {
        name: "Cupcake de Limão Siciliano",
        slug: "cupcake-limao",
        description: "Refrescante cupcake de limão com cobertura cítrica",
        price: 1100,
        category_slug: "frutas",
        stock: 40,
        image_url: "https://images.unsplash.com/photo-1519869325930-281384150729?w=500",
    },
    SeedProduct {
        name: "Cupcake Red Velvet",
        slug: "cupcake-red-velvet",
        description: "Famoso red velvet com cream cheese frosting",
        price: 1500,
        category_slug: "especiais",
        stock: 35,
        image_url: "https://images.unsplash.com/photo-1599785209796-786432b228bc?w=500",
    },
    SeedProduct {
        name: "Cupcake de Cenoura",
        slug: "cupcake-cenoura",
        description: "Cupcake de cenoura com cobertura de cream cheese",
        price: 1100,
        category_slug: "classicos",
        stock: 55,
        image_url: "https://images.unsplash.com/photo-1603532648955-039310d9ed75?w=500",
    },
    SeedProduct {
        name: "Cupcake de Chocolate Mint",
        slug: "cupcake-chocolate-mint",
        description: "Chocolate com toque refrescante de menta",
        price: 1300,
        category_slug: "chocolate",
        stock: 30,
        image_url: "https://images.unsplash.com/photo-1426869884541-df7117556757?w=500",
    },
    SeedProduct {
        name: "Cupcake Vegano de Banana",
        slug: "cupcake-vegano-banana",
        description: "100% vegano com banana e cobertura de chocolate",
        price: 1400,
        category_slug: "veganos",
        stock: 25,
        image_url: "https://images.unsplash.com/photo-1486427944299-d1955d23e34d?w=500",
    },
];

/// Seed categories and products, upserting by slug.
pub async fn run() -> Result<(), CliError> {
    let pool = super::connect().await?;

    tracing::info!("Seeding categories...");
    for category in CATEGORIES {
        seed_category(&pool, category).await?;
        tracing::info!(slug = category.slug, "seeded category");
    }

    tracing::info!("Seeding products...");
    for product in PRODUCTS {
        seed_product(&pool, product).await?;
        tracing::info!(slug = product.slug, "seeded product");
    }

    tracing::info!("Seed complete");
    Ok(())
}

async fn seed_category(pool: &PgPool, category: &SeedCategory) -> Result<(), CliError> {
    sqlx::query(
        "INSERT INTO categories (name, slug, description)
         VALUES ($1, $2, $3)
         ON CONFLICT (slug) DO UPDATE
             SET name = EXCLUDED.name, description = EXCLUDED.description",
    )
    .bind(category.name)
    .bind(category.slug)
    .bind(category.description)
    .execute(pool)
    .await?;

    Ok(())
}

async fn seed_product(pool: &PgPool, product: &SeedProduct) -> Result<(), CliError> {
    // Stock is only set on first insert; re-running the seed must not
    // undo sales.
    sqlx::query(
        "INSERT INTO products
             (name, slug, description, price, category_id, stock, image_url, active)
         SELECT $1, $2, $3, $4, c.id, $6, $7, TRUE
         FROM categories c WHERE c.slug = $5
         ON CONFLICT (slug) DO UPDATE SET
             name = EXCLUDED.name,
             description = EXCLUDED.description,
             price = EXCLUDED.price,
             category_id = EXCLUDED.category_id,
             image_url = EXCLUDED.image_url,
             updated_at = now()",
    )
    .bind(product.name)
    .bind(product.slug)
    .bind(product.description)
    .bind(product.price)
    .bind(product.category_slug)
    .bind(product.stock)
    .bind(product.image_url)
    .execute(pool)
    .await?;

    Ok(())
}
