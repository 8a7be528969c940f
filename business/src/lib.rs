pub mod application {
    pub mod cart {
        pub mod session;
        pub mod writer;
    }
    pub mod order {
        pub mod place;
    }
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod notifications;
    pub mod cart {
        pub mod errors;
        pub mod model;
        pub mod pricing;
        pub mod store;
    }
    pub mod order {
        pub mod errors;
        pub mod model;
        pub mod services;
        pub mod use_cases {
            pub mod place;
        }
    }
    pub mod product {
        pub mod errors;
        pub mod model;
        pub mod services;
    }
    pub mod promo_code {
        pub mod errors;
        pub mod model;
        pub mod services;
    }
    pub mod shared {
        pub mod value_objects;
    }
}
