//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use storefront_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            records::{CartLineRecord, CartLineUuid},
        },
        orders::{
            MockOrdersService,
            records::{OrderLineRecord, OrderLineUuid, OrderRecord, OrderStatus, OrderUuid},
        },
        products::{
            MockProductsService,
            records::{ProductRecord, ProductUuid},
        },
        users::{MockUsersService, records::UserUuid},
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user_uuid(TEST_USER_UUID);
    ctrl.call_next(req, depot, res).await;
}

/// Service mocks backing a test [`State`].
///
/// Mocks without expectations fail the test on any call.
#[derive(Default)]
pub(crate) struct MockServices {
    pub(crate) products: MockProductsService,
    pub(crate) carts: MockCartsService,
    pub(crate) orders: MockOrdersService,
    pub(crate) auth: MockAuthService,
}

impl MockServices {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            products: Arc::new(self.products),
            carts: Arc::new(self.carts),
            orders: Arc::new(self.orders),
            users: Arc::new(MockUsersService::new()),
            auth: Arc::new(self.auth),
        })
    }

    /// Serve `route` as the authenticated [`TEST_USER_UUID`].
    pub(crate) fn into_service(self, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state()))
                .hoop(inject_user)
                .push(route),
        )
    }
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    MockServices {
        auth,
        ..MockServices::default()
    }
    .into_state()
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    MockServices {
        products,
        ..MockServices::default()
    }
    .into_service(route)
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    MockServices {
        carts,
        ..MockServices::default()
    }
    .into_service(route)
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    MockServices {
        orders,
        ..MockServices::default()
    }
    .into_service(route)
}

pub(crate) fn make_product(uuid: ProductUuid) -> ProductRecord {
    ProductRecord {
        uuid,
        name: "Teapot".to_string(),
        description: Some("Holds two cups".to_string()),
        category: Some("kitchen".to_string()),
        price: 1_000,
        stock: 5,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_cart_line(uuid: CartLineUuid, product: ProductUuid, quantity: u32) -> CartLineRecord {
    CartLineRecord {
        uuid,
        product_uuid: product,
        product_name: "Teapot".to_string(),
        unit_price: 1_000,
        stock: 5,
        quantity,
        subtotal: 1_000 * u64::from(quantity),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_order(uuid: OrderUuid) -> OrderRecord {
    OrderRecord {
        uuid,
        user_uuid: TEST_USER_UUID,
        total: 2_500,
        status: OrderStatus::Pending,
        shipping_address: "1 High Street".to_string(),
        lines: vec![
            OrderLineRecord {
                uuid: OrderLineUuid::new(),
                position: 0,
                product_uuid: ProductUuid::new(),
                product_name: "Teapot".to_string(),
                quantity: 2,
                unit_price: 1_000,
            },
            OrderLineRecord {
                uuid: OrderLineUuid::new(),
                position: 1,
                product_uuid: ProductUuid::new(),
                product_name: "Cup".to_string(),
                quantity: 1,
                unit_price: 500,
            },
        ],
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
