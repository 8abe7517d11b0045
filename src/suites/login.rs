//! Login feature tests

use futures::FutureExt;

use super::{case, label};
use crate::data::DataLoader;
use crate::error::SuiteError;
use crate::runner::{Marker, Suite, TestCase};

pub(super) fn cases(loader: &DataLoader) -> Result<Vec<TestCase>, SuiteError> {
    let valid = loader.valid_users()?;
    let invalid = loader.invalid_users()?;

    let mut cases = Vec::new();

    for user in valid {
        cases.push(case(
            format!("login::valid_{}", label(&user.username)),
            Suite::Login,
            vec![Marker::Login, Marker::Smoke, Marker::Regression],
            move |fx| {
                let user = user.clone();
                async move {
                    let login = fx.login_page()?;
                    login.open().await?;
                    login.login(&user.username, &user.password).await?;
                    login.expect_login_successful().await?;
                    fx.inventory_page()?.expect_on_inventory_page().await
                }
                .boxed()
            },
        ));
    }

    for (index, user) in invalid.into_iter().enumerate() {
        cases.push(case(
            format!("login::rejected_{}_{}", index, label(&user.username)),
            Suite::Login,
            vec![Marker::Login, Marker::Negative, Marker::Regression],
            move |fx| {
                let user = user.clone();
                async move {
                    let login = fx.login_page()?;
                    login.open().await?;
                    login.login(&user.username, &user.password).await?;
                    login.expect_error_message(&user.error).await
                }
                .boxed()
            },
        ));
    }

    cases.push(case(
        "login::error_message_can_be_dismissed".to_string(),
        Suite::Login,
        vec![Marker::Login, Marker::Negative, Marker::Regression],
        |fx| {
            async move {
                let login = fx.login_page()?;
                login.open().await?;
                login.login("", "").await?;
                login.expect_error_message("Username is required").await?;
                login.close_error_message().await?;
                login.expect_no_error().await
            }
            .boxed()
        },
    ));

    cases.push(case(
        "login::form_keeps_logo_visible".to_string(),
        Suite::Login,
        vec![Marker::Login, Marker::Regression],
        |fx| {
            async move {
                let login = fx.login_page()?;
                login.open().await?;
                login.expect_logo_visible().await
            }
            .boxed()
        },
    ));

    Ok(cases)
}
