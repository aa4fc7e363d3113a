use crate::fields::Field;
use crate::form::{FormBuilder, SimpleFormBuilder, View};

/// Event screens and the parameters each of them edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionView {
    AddPaymentInfo,
    AddToCart,
    AddToWishlist,
    CompleteRegistration,
    Contact,
    CustomizeProduct,
    Donate,
    FindLocation,
    InitiateCheckout,
    Lead,
    Purchase,
    Schedule,
    Search,
    StartTrial,
    SubmitApplication,
    Subscribe,
    ViewContent,
    /// Older screen with plain value and currency inputs.
    ValueCurrency,
}

impl ActionView {
    pub const ALL: [ActionView; 18] = [
        ActionView::AddPaymentInfo,
        ActionView::AddToCart,
        ActionView::AddToWishlist,
        ActionView::CompleteRegistration,
        ActionView::Contact,
        ActionView::CustomizeProduct,
        ActionView::Donate,
        ActionView::FindLocation,
        ActionView::InitiateCheckout,
        ActionView::Lead,
        ActionView::Purchase,
        ActionView::Schedule,
        ActionView::Search,
        ActionView::StartTrial,
        ActionView::SubmitApplication,
        ActionView::Subscribe,
        ActionView::ViewContent,
        ActionView::ValueCurrency,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ActionView::AddPaymentInfo => "sendAddPaymentInfoEvent",
            ActionView::AddToCart => "sendAddToCartEvent",
            ActionView::AddToWishlist => "sendAddToWishlistEvent",
            ActionView::CompleteRegistration => "sendCompleteRegistrationEvent",
            ActionView::Contact => "sendContactEvent",
            ActionView::CustomizeProduct => "sendCustomizeProductEvent",
            ActionView::Donate => "sendDonateEvent",
            ActionView::FindLocation => "sendFindLocationEvent",
            ActionView::InitiateCheckout => "sendInitiateCheckoutEvent",
            ActionView::Lead => "sendLeadEvent",
            ActionView::Purchase => "sendPurchaseEvent",
            ActionView::Schedule => "sendScheduleEvent",
            ActionView::Search => "sendSearchEvent",
            ActionView::StartTrial => "sendStartTrialEvent",
            ActionView::SubmitApplication => "sendSubmitApplicationEvent",
            ActionView::Subscribe => "sendSubscribeEvent",
            ActionView::ViewContent => "sendViewContentEvent",
            ActionView::ValueCurrency => "valueCurrency",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|view| view.name() == name)
    }

    /// Parameters in display order. Every pixel event screen ends with the
    /// event id.
    pub fn fields(self) -> &'static [Field] {
        use Field::*;

        match self {
            ActionView::AddPaymentInfo => {
                &[Value, Currency, ContentCategory, ContentIds, Contents, EventId]
            }
            ActionView::AddToCart => &[
                Value, Currency, ContentName, ContentType, ContentIds, Contents, EventId,
            ],
            ActionView::AddToWishlist => &[
                Value, Currency, ContentName, ContentCategory, ContentIds, Contents, EventId,
            ],
            ActionView::CompleteRegistration => &[Value, Currency, ContentName, Status, EventId],
            ActionView::Contact
            | ActionView::CustomizeProduct
            | ActionView::Donate
            | ActionView::FindLocation
            | ActionView::Schedule
            | ActionView::SubmitApplication => &[EventId],
            ActionView::InitiateCheckout => &[
                Value, Currency, ContentCategory, ContentIds, Contents, NumItems, EventId,
            ],
            ActionView::Lead => &[Value, Currency, ContentName, ContentCategory, EventId],
            ActionView::Purchase => &[
                Value, Currency, ContentName, ContentType, ContentIds, Contents, NumItems, EventId,
            ],
            ActionView::Search => &[
                Value, Currency, ContentCategory, ContentIds, Contents, SearchString, EventId,
            ],
            ActionView::StartTrial | ActionView::Subscribe => {
                &[Value, Currency, PredictedLtv, EventId]
            }
            ActionView::ViewContent => &[
                Value, Currency, ContentName, ContentCategory, ContentType, ContentIds, Contents,
                EventId,
            ],
            ActionView::ValueCurrency => &[Value, Currency],
        }
    }

    pub fn into_view(self) -> Box<dyn View> {
        let fields = self.fields();
        match self {
            ActionView::ValueCurrency => {
                Box::new(SimpleFormBuilder::new(fields.iter().map(|field| field.key())))
            }
            _ => Box::new(FormBuilder::from_fields(fields)),
        }
    }
}
