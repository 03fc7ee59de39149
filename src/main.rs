/* ===============================================================================
Restaurant menu bot.
Main module. 21 May 2020.
----------------------------------------------------------------------------
Licensed under the terms of the GPL version 3.
http://www.gnu.org/licenses/gpl-3.0.html
Copyright (c) 2020-2026 by Artem Khomenko _mag12@yahoo.com.
=============================================================================== */

use std::{fmt::Debug, sync::Arc};
use futures::future::BoxFuture;
use teloxide::{prelude::*,
   dispatching::dialogue::InMemStorage,
   error_handlers::ErrorHandler,
};

mod admin;
mod callback;
mod dish;
mod draft;
mod environment;
mod loc;
mod navigation;
mod states;
mod store;
use crate::states::*;
use crate::store::Store;

// ============================================================================
// [Run!]
// ============================================================================
#[tokio::main]
async fn main() {
   run().await;
}

struct MyErrorHandler {}
impl<E> ErrorHandler<E> for MyErrorHandler
where
    E: Debug,
{
    fn handle_error(self: Arc<Self>, error: E) -> BoxFuture<'static, ()> {
      let text = format!("main::handle_error: {:?}", error);
      log::error!("{}", text);

      let fut = async move {
         if environment::log(&text).await.is_none() {
            log::info!("main::Unable to send message to the service chat");
         };
      };

      Box::pin(fut)
   }
}

async fn run() {
   let mut builder = pretty_env_logger::formatted_builder();
   builder.target(pretty_env_logger::env_logger::Target::Stdout);
   builder.parse_filters(&std::env::var("RUST_LOG").unwrap_or_else(|_| String::from("info")));
   builder.init();

   log::info!("Starting...");

   let bot = Bot::from_env();

   // Settings from environments
   let vars = environment::Vars::from_env(bot.clone());
   match environment::VARS.set(vars) {
      Ok(_) => {environment::log("Bot restarted").await;},
      _ => log::info!("Something wrong with settings"),
   }

   // Every session starts from the same menu
   let store = Arc::new(Store::new(dish::seed()));
   log::info!("Menu loaded, {} dishes", store.len());

   Dispatcher::builder(bot, states::schema())
   .dependencies(dptree::deps![InMemStorage::<State>::new(), store])
   .default_handler(|upd| async move {
      log::info!("main::Unhandled update: {:?}", upd.kind);
   })
   // If the dispatcher fails for some reason, execute this handler.
   .error_handler(Arc::new(MyErrorHandler{}))
   .enable_ctrlc_handler()
   .build()
   .dispatch()
   .await;
}
