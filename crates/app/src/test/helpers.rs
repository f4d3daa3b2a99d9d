//! Test Helpers

use crate::{
    domain::{
        carts::{CartsService, CartsServiceError, data::NewCartLine, records::CartLineRecord},
        products::{
            ProductsService, ProductsServiceError,
            data::NewProduct,
            records::{ProductRecord, ProductUuid},
        },
        users::{
            UsersService, UsersServiceError,
            data::NewUser,
            records::{UserRecord, UserUuid},
        },
    },
    test::TestContext,
};

pub(crate) async fn create_user(
    ctx: &TestContext,
    email: &str,
) -> Result<UserRecord, UsersServiceError> {
    ctx.users
        .create_user(NewUser {
            uuid: UserUuid::new(),
            name: "Another User".to_string(),
            email: email.to_string(),
        })
        .await
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    name: &str,
    price: u64,
    stock: u32,
) -> Result<ProductRecord, ProductsServiceError> {
    ctx.products
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            name: name.to_string(),
            description: None,
            category: None,
            price,
            stock,
        })
        .await
}

pub(crate) async fn add_line(
    ctx: &TestContext,
    user: UserUuid,
    product: ProductUuid,
    quantity: u32,
) -> Result<CartLineRecord, CartsServiceError> {
    ctx.carts
        .add_line(
            user,
            NewCartLine {
                product_uuid: product,
                quantity,
            },
        )
        .await
}
