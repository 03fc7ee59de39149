/* ===============================================================================
Restaurant menu bot.
Callback from inline button. 27 May 2021.
----------------------------------------------------------------------------
Licensed under the terms of the GPL version 3.
http://www.gnu.org/licenses/gpl-3.0.html
Copyright (c) 2020-2026 by Artem Khomenko _mag12@yahoo.com.
=============================================================================== */

use std::sync::Arc;
use strum::{AsRefStr, };

use teloxide::{
   prelude::*,
   types::{CallbackQuery, ChatId, MessageId, },
};
use crate::states::*;
use crate::admin;
use crate::dish::DishId;
use crate::navigation::{self, Listing, Route, };
use crate::store::Store;
use crate::loc::*;

#[derive(AsRefStr, Debug, PartialEq, Eq)]
pub enum Command {
   #[strum(to_string = "dta")]
   DetailAll(DishId), // open dish from the whole menu
   #[strum(to_string = "dts")]
   DetailSpecials(DishId), // open dish from the specials
   #[strum(to_string = "bka")]
   BackAll, // close dish and return to the whole menu
   #[strum(to_string = "bks")]
   BackSpecials, // close dish and return to the specials
   #[strum(to_string = "rmy")]
   RemoveYes(DishId), // confirm removing
   #[strum(to_string = "rmn")]
   RemoveNo(DishId), // cancel removing
   #[strum(to_string = "cly")]
   ClearYes, // confirm clearing the menu
   #[strum(to_string = "cln")]
   ClearNo, // cancel clearing the menu
   Unknown,
}

impl Command {
   pub fn parse(s: &str) -> Self {
      // Looking for the commands with arguments
      let cmd = s.get(..3).unwrap_or_default();
      let arg = s.get(3..)
      .unwrap_or_default()
      .parse::<DishId>();

      if cmd == Self::BackAll.as_ref() {
         Command::BackAll
      } else if cmd == Self::BackSpecials.as_ref() {
         Command::BackSpecials
      } else if cmd == Self::ClearYes.as_ref() {
         Command::ClearYes
      } else if cmd == Self::ClearNo.as_ref() {
         Command::ClearNo
      } else if let Ok(arg) = arg {
         if cmd == Self::DetailAll(0).as_ref() {
            Command::DetailAll(arg)
         } else if cmd == Self::DetailSpecials(0).as_ref() {
            Command::DetailSpecials(arg)
         } else if cmd == Self::RemoveYes(0).as_ref() {
            Command::RemoveYes(arg)
         } else if cmd == Self::RemoveNo(0).as_ref() {
            Command::RemoveNo(arg)
         } else {
            Command::Unknown
         }
      } else {
         Command::Unknown
      }
   }

   pub fn detail(listing: Listing, id: DishId) -> Self {
      match listing {
         Listing::All => Command::DetailAll(id),
         Listing::Specials => Command::DetailSpecials(id),
      }
   }

   pub fn back(listing: Listing) -> Self {
      match listing {
         Listing::All => Command::BackAll,
         Listing::Specials => Command::BackSpecials,
      }
   }

   // Text for callback data
   pub fn data(&self) -> String {
      match self {
         Command::DetailAll(id)
         | Command::DetailSpecials(id)
         | Command::RemoveYes(id)
         | Command::RemoveNo(id) => format!("{}{}", self.as_ref(), id),
         _ => String::from(self.as_ref()),
      }
   }
}

pub async fn update(bot: Bot, q: CallbackQuery, state: State, store: Arc<Store>) -> HandlerResult {

   // Message with the button
   let origin = q.regular_message()
   .map(|message| (message.chat.id, message.id));
   let chat_id = origin.map(|(chat_id, _)| chat_id)
   .unwrap_or(ChatId::from(q.from.id));

   // Parse and process commands by receiving a message to send back
   let cmd = Command::parse(q.data.as_deref().unwrap_or_default());
   let msg = match (cmd, origin) {
      (Command::DetailAll(id), _) => show_detail(&bot, chat_id, &store, id, Listing::All).await?,
      (Command::DetailSpecials(id), _) => show_detail(&bot, chat_id, &store, id, Listing::Specials).await?,
      (Command::BackAll, origin) => back(&bot, chat_id, &store, origin, Listing::All).await?,
      (Command::BackSpecials, origin) => back(&bot, chat_id, &store, origin, Listing::Specials).await?,
      (cmd @ (Command::RemoveYes(_) | Command::RemoveNo(_) | Command::ClearYes | Command::ClearNo), Some(origin))
      => admin::confirmation(&bot, origin, state, &store, cmd, &q.from).await?,
      _ => loc(Key::CallbackUnknown, &[]),
   };

   // Text for popup window
   bot.answer_callback_query(q.id.clone())
   .text(msg)
   .await?;

   Ok(())
}

async fn show_detail(bot: &Bot, chat_id: ChatId, store: &Store, id: DishId, back: Listing) -> Result<String, BoxError> {
   // Snapshot at the moment of tap
   match store.find(id) {
      Some(dish) => {
         let text = dish.name.clone();
         navigation::show(bot, chat_id, store, Route::Detail { dish, back }).await?;
         Ok(text)
      }
      None => {
         navigation::view_missing(bot, chat_id, back).await?;
         Ok(loc(Key::NavigationNoItem, &[]))
      }
   }
}

async fn back(bot: &Bot, chat_id: ChatId, store: &Store, origin: Option<(ChatId, MessageId)>, listing: Listing) -> Result<String, BoxError> {
   // The list is still above, just remove the card
   let deleted = match origin {
      Some((chat_id, message_id)) => bot.delete_message(chat_id, message_id).await.is_ok(),
      None => false,
   };

   if !deleted {
      navigation::show(bot, chat_id, store, listing.route()).await?;
   }

   Ok(String::default())
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn data_parses_back() {
      let commands = [
         Command::DetailAll(3),
         Command::DetailSpecials(4),
         Command::BackAll,
         Command::BackSpecials,
         Command::RemoveYes(12),
         Command::RemoveNo(12),
         Command::ClearYes,
         Command::ClearNo,
      ];
      for cmd in commands {
         assert_eq!(Command::parse(&cmd.data()), cmd);
      }
   }

   #[test]
   fn garbage_is_unknown() {
      assert_eq!(Command::parse(""), Command::Unknown);
      assert_eq!(Command::parse("dta"), Command::Unknown);
      assert_eq!(Command::parse("dtaxx"), Command::Unknown);
      assert_eq!(Command::parse("zzz1"), Command::Unknown);
      assert_eq!(Command::detail(Listing::Specials, 7).data(), "dts7");
   }
}
