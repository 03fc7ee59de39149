/* ===============================================================================
Restaurant menu bot.
Global vars, service chat. 18 July 2020.
----------------------------------------------------------------------------
Licensed under the terms of the GPL version 3.
http://www.gnu.org/licenses/gpl-3.0.html
Copyright (c) 2020-2026 by Artem Khomenko _mag12@yahoo.com.
=============================================================================== */

use once_cell::sync::{OnceCell};
use std::{env, };
use teloxide::{
   prelude::*, types::{Recipient, ChatId, MessageId,},
};

// Settings
pub static VARS: OnceCell<Vars> = OnceCell::new();

const DEFAULT_PRICE_PREFIX: &str = "R";
const DEFAULT_TITLE: &str = "Christoffel's Private Culinary";

// For send info to service chat
#[derive(Clone)]
struct ServiceChat {
   recipient: Recipient,
   bot: Bot,
}

impl ServiceChat {
   async fn send(&self, text: &str) -> Option<MessageId> {
      let res = self.bot
      .send_message(self.recipient.to_owned(), text)
      .disable_notification(true)
      .await;

      match res {
         Ok(m) => Some(m.id),
         Err(err) => {
            log::info!("Error log({}): {}", text, err);
            None
         }
      }
   }
}

// Send message to service chat without notification
pub async fn log(text: &str) -> Option<MessageId> {
   match VARS.get().and_then(|vars| vars.chat.as_ref()) {
      Some(chat) => chat.send(text).await,
      None => None,
   }
}

// Enviroment variables
pub struct Vars {
   // Service chat
   chat: Option<ServiceChat>,

   // Goes before the price, currency sign
   price_prefix: String,

   // Restaurant name for welcome
   title: String,
}

impl Vars {
   pub fn from_env(service_bot: Bot) -> Self {

      // Service chat
      let chat = if let Ok(log_group_id_env) = env::var("LOG_GROUP_ID") {
         if let Ok(log_group_id) = log_group_id_env.parse::<i64>() {
            // Save id and bot
            let id = ChatId(log_group_id);
            Some(ServiceChat {
               recipient: Recipient::Id(id),
               bot: service_bot,
            })
         } else {
            log::info!("Environment variable LOG_GROUP_ID must be integer");
            None
         }
      } else {
         log::info!("There is no environment variable LOG_GROUP_ID, no service chat");
         None
      };

      Vars {
         price_prefix: {
            match env::var("PRICE_PREFIX") {
               Ok(s) => s,
               Err(_) => String::from(DEFAULT_PRICE_PREFIX), // if the variable is not set, that's ok
            }
         },

         title: {
            match env::var("RESTAURANT_TITLE") {
               Ok(s) if !s.trim().is_empty() => {
                  log::info!("restaurant title is {}", s);
                  s
               }
               _ => String::from(DEFAULT_TITLE),
            }
         },

         chat,
      }
   }
}

// Price with the currency sign
pub fn price_with_unit(price: &str) -> String {
   let prefix = VARS.get()
   .map(|vars| vars.price_prefix.as_str())
   .unwrap_or(DEFAULT_PRICE_PREFIX);
   format!("{}{}", prefix, price)
}

pub fn title() -> String {
   VARS.get()
   .map(|vars| vars.title.clone())
   .unwrap_or(String::from(DEFAULT_TITLE))
}
