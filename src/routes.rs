use crate::{
    api::{attendance, health, salary, sales},
    error::ApiError,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, api_prefix: &str) {
    // Decoding failures become the JSON 400 shape instead of actix's
    // plain-text defaults (and 404 for bad path segments).
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| ApiError::bad_request(err.to_string()).into()),
    )
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        ApiError::bad_request(format!("invalid path parameter: {err}")).into()
    }))
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| ApiError::bad_request(err.to_string()).into()),
    );

    cfg.service(
        web::scope(api_prefix)
            .service(web::resource("/health").route(web::get().to(health::health)))
            .service(
                web::scope("/sales")
                    // /sales
                    .service(web::resource("").route(web::post().to(sales::create_sale)))
                    // /sales/employee/{employee_id}?date=YYYY-MM-DD
                    .service(
                        web::resource("/employee/{employee_id}")
                            .route(web::get().to(sales::sales_by_employee_and_date)),
                    )
                    // /sales/{id}
                    .service(web::resource("/{id}").route(web::get().to(sales::get_sale))),
            )
            .service(
                web::scope("/attendance")
                    .service(
                        web::resource("/clock-in").route(web::post().to(attendance::clock_in)),
                    )
                    .service(
                        web::resource("/clock-out").route(web::post().to(attendance::clock_out)),
                    )
                    // /attendance/employee/{employee_id}/open
                    .service(
                        web::resource("/employee/{employee_id}/open")
                            .route(web::get().to(attendance::open_shift)),
                    ),
            )
            .service(
                web::scope("/salary")
                    // must precede /{id}
                    .service(web::resource("/pay").route(web::post().to(salary::pay_salary)))
                    .service(web::resource("/{id}").route(web::get().to(salary::get_salary))),
            ),
    );
}
