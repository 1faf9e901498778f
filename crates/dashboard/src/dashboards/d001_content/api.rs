use crate::domain::a003_text::model::fetch_page;
use crate::domain::a003_text::ui::legal::LEGAL_PAGE;
use crate::shared::record_store::{fetch_collection, RecordStore, StoreError};
use contracts::domain::a001_faq::FaqItem;
use contracts::domain::a002_package::PackageItem;
use contracts::domain::a003_text::TextItem;
use contracts::domain::a004_image::ImageItem;

/// Данные одной вкладки
#[derive(Debug, Clone)]
pub enum TabData {
    /// Texts of one page plus the image library
    Section {
        texts: Vec<TextItem>,
        images: Vec<ImageItem>,
    },
    /// All texts (package descriptions live outside the Pricing page)
    Pricing {
        texts: Vec<TextItem>,
        images: Vec<ImageItem>,
        packages: Vec<PackageItem>,
    },
    Legal { texts: Vec<TextItem> },
    Faq { items: Vec<FaqItem> },
}

/// Загрузить тексты страницы и медиатеку параллельно
pub async fn fetch_section(store: &dyn RecordStore, page: &str) -> Result<TabData, StoreError> {
    let (texts, images) = futures::try_join!(
        fetch_page(store, page),
        fetch_collection::<ImageItem, _>(store),
    )?;
    Ok(TabData::Section { texts, images })
}

pub async fn fetch_pricing(store: &dyn RecordStore) -> Result<TabData, StoreError> {
    let (texts, images, packages) = futures::try_join!(
        fetch_collection::<TextItem, _>(store),
        fetch_collection::<ImageItem, _>(store),
        fetch_collection::<PackageItem, _>(store),
    )?;
    Ok(TabData::Pricing {
        texts,
        images,
        packages,
    })
}

pub async fn fetch_legal(store: &dyn RecordStore) -> Result<TabData, StoreError> {
    let texts = fetch_page(store, LEGAL_PAGE).await?;
    Ok(TabData::Legal { texts })
}

pub async fn fetch_faq(store: &dyn RecordStore) -> Result<TabData, StoreError> {
    let items = fetch_collection::<FaqItem, _>(store).await?;
    Ok(TabData::Faq { items })
}
