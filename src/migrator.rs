use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_brand_themes_table::Migration),
            Box::new(m20250101_000002_create_artisan_shops_table::Migration),
            Box::new(m20250101_000003_create_products_tables::Migration),
            Box::new(m20250101_000004_create_notifications_table::Migration),
            Box::new(m20250101_000005_create_inventory_tables::Migration),
            Box::new(m20250101_000006_create_promotions_tables::Migration),
            Box::new(m20250101_000007_create_user_maturity_scores_table::Migration),
        ]
    }
}

mod m20250101_000001_create_brand_themes_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000001_create_brand_themes_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(BrandThemes::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(BrandThemes::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(BrandThemes::ThemeId).string_len(100).not_null())
                        .col(ColumnDef::new(BrandThemes::Palette).json().not_null())
                        .col(ColumnDef::new(BrandThemes::StyleContext).json().null())
                        .col(ColumnDef::new(BrandThemes::UsageRules).json().null())
                        .col(ColumnDef::new(BrandThemes::PreviewDescription).text().null())
                        .col(
                            ColumnDef::new(BrandThemes::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(ColumnDef::new(BrandThemes::UserId).uuid().null())
                        .col(
                            ColumnDef::new(BrandThemes::Version)
                                .integer()
                                .not_null()
                                .default(1),
                        )
                        .col(
                            ColumnDef::new(BrandThemes::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(BrandThemes::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_brand_themes_theme_id")
                        .table(BrandThemes::Table)
                        .col(BrandThemes::ThemeId)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_brand_themes_user_id")
                        .table(BrandThemes::Table)
                        .col(BrandThemes::UserId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(BrandThemes::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum BrandThemes {
        Table,
        Id,
        ThemeId,
        Palette,
        StyleContext,
        UsageRules,
        PreviewDescription,
        IsActive,
        UserId,
        Version,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250101_000002_create_artisan_shops_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000002_create_artisan_shops_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ArtisanShops::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(ArtisanShops::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(ArtisanShops::UserId).uuid().not_null())
                        .col(ColumnDef::new(ArtisanShops::ShopName).string().not_null())
                        .col(ColumnDef::new(ArtisanShops::ShopSlug).string().not_null())
                        .col(ColumnDef::new(ArtisanShops::Description).text().null())
                        .col(ColumnDef::new(ArtisanShops::Story).text().null())
                        .col(ColumnDef::new(ArtisanShops::LogoUrl).string().null())
                        .col(ColumnDef::new(ArtisanShops::BannerUrl).string().null())
                        .col(ColumnDef::new(ArtisanShops::CraftType).string().null())
                        .col(ColumnDef::new(ArtisanShops::Region).string().null())
                        .col(ColumnDef::new(ArtisanShops::Department).string().null())
                        .col(ColumnDef::new(ArtisanShops::Municipality).string().null())
                        .col(ColumnDef::new(ArtisanShops::Certifications).json().not_null())
                        .col(ColumnDef::new(ArtisanShops::ContactInfo).json().null())
                        .col(ColumnDef::new(ArtisanShops::SocialLinks).json().null())
                        .col(
                            ColumnDef::new(ArtisanShops::Active)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(ArtisanShops::Featured)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(ArtisanShops::PublishStatus)
                                .string_len(20)
                                .not_null()
                                .default("pending_publish"),
                        )
                        .col(
                            ColumnDef::new(ArtisanShops::MarketplaceApproved)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(ArtisanShops::MarketplaceApprovedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(ColumnDef::new(ArtisanShops::MarketplaceApprovedBy).uuid().null())
                        .col(ColumnDef::new(ArtisanShops::BankAccountRef).string().null())
                        .col(
                            ColumnDef::new(ArtisanShops::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ArtisanShops::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_artisan_shops_shop_slug")
                        .table(ArtisanShops::Table)
                        .col(ArtisanShops::ShopSlug)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_artisan_shops_user_id")
                        .table(ArtisanShops::Table)
                        .col(ArtisanShops::UserId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ArtisanShops::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum ArtisanShops {
        Table,
        Id,
        UserId,
        ShopName,
        ShopSlug,
        Description,
        Story,
        LogoUrl,
        BannerUrl,
        CraftType,
        Region,
        Department,
        Municipality,
        Certifications,
        ContactInfo,
        SocialLinks,
        Active,
        Featured,
        PublishStatus,
        MarketplaceApproved,
        MarketplaceApprovedAt,
        MarketplaceApprovedBy,
        BankAccountRef,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250101_000003_create_products_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000003_create_products_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Products::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Products::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Products::ShopId).uuid().not_null())
                        .col(ColumnDef::new(Products::Name).string().not_null())
                        .col(ColumnDef::new(Products::Description).text().null())
                        .col(ColumnDef::new(Products::ShortDescription).string().null())
                        .col(
                            ColumnDef::new(Products::Price)
                                .decimal_len(19, 4)
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Products::ComparePrice).decimal_len(19, 4).null())
                        .col(ColumnDef::new(Products::Category).string().null())
                        .col(ColumnDef::new(Products::Subcategory).string().null())
                        .col(ColumnDef::new(Products::Images).json().not_null())
                        .col(ColumnDef::new(Products::Tags).json().not_null())
                        .col(ColumnDef::new(Products::Materials).json().not_null())
                        .col(ColumnDef::new(Products::Techniques).json().not_null())
                        .col(
                            ColumnDef::new(Products::Inventory)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Products::Sku).string().null())
                        .col(
                            ColumnDef::new(Products::ModerationStatus)
                                .string_len(32)
                                .not_null()
                                .default("draft"),
                        )
                        .col(
                            ColumnDef::new(Products::Active)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(Products::Featured)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(Products::Weight).decimal_len(10, 3).null())
                        .col(ColumnDef::new(Products::Dimensions).json().null())
                        .col(
                            ColumnDef::new(Products::ShippingDataComplete)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(Products::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Products::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_products_shop_id")
                                .from(Products::Table, Products::ShopId)
                                .to(ArtisanShops::Table, ArtisanShops::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_products_shop_id")
                        .table(Products::Table)
                        .col(Products::ShopId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_products_moderation_status")
                        .table(Products::Table)
                        .col(Products::ModerationStatus)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ProductModerationHistory::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ProductModerationHistory::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductModerationHistory::ProductId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductModerationHistory::PreviousStatus)
                                .string_len(32)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ProductModerationHistory::NewStatus)
                                .string_len(32)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductModerationHistory::ModeratorId)
                                .uuid()
                                .null(),
                        )
                        .col(ColumnDef::new(ProductModerationHistory::ArtisanId).uuid().null())
                        .col(ColumnDef::new(ProductModerationHistory::Comment).text().null())
                        .col(ColumnDef::new(ProductModerationHistory::EditsMade).json().null())
                        .col(
                            ColumnDef::new(ProductModerationHistory::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_moderation_history_product_id")
                                .from(
                                    ProductModerationHistory::Table,
                                    ProductModerationHistory::ProductId,
                                )
                                .to(Products::Table, Products::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_moderation_history_product_id")
                        .table(ProductModerationHistory::Table)
                        .col(ProductModerationHistory::ProductId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ProductModerationHistory::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Products::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum ArtisanShops {
        Table,
        Id,
    }

    #[derive(DeriveIden)]
    enum Products {
        Table,
        Id,
        ShopId,
        Name,
        Description,
        ShortDescription,
        Price,
        ComparePrice,
        Category,
        Subcategory,
        Images,
        Tags,
        Materials,
        Techniques,
        Inventory,
        Sku,
        ModerationStatus,
        Active,
        Featured,
        Weight,
        Dimensions,
        ShippingDataComplete,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum ProductModerationHistory {
        Table,
        Id,
        ProductId,
        PreviousStatus,
        NewStatus,
        ModeratorId,
        ArtisanId,
        Comment,
        EditsMade,
        CreatedAt,
    }
}

mod m20250101_000004_create_notifications_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000004_create_notifications_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Notifications::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Notifications::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Notifications::UserId).uuid().not_null())
                        .col(ColumnDef::new(Notifications::Type).string_len(50).not_null())
                        .col(ColumnDef::new(Notifications::Title).string().not_null())
                        .col(ColumnDef::new(Notifications::Message).text().not_null())
                        .col(ColumnDef::new(Notifications::Metadata).json().null())
                        .col(
                            ColumnDef::new(Notifications::Read)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(Notifications::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_notifications_user_id")
                        .table(Notifications::Table)
                        .col(Notifications::UserId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Notifications::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Notifications {
        Table,
        Id,
        UserId,
        Type,
        Title,
        Message,
        Metadata,
        Read,
        CreatedAt,
    }
}

mod m20250101_000005_create_inventory_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000005_create_inventory_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ProductVariants::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(ProductVariants::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(ProductVariants::ProductId).uuid().not_null())
                        .col(ColumnDef::new(ProductVariants::Sku).string().not_null())
                        .col(
                            ColumnDef::new(ProductVariants::Price)
                                .decimal_len(19, 4)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(ProductVariants::Stock)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(ProductVariants::MinStock)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(ProductVariants::Status)
                                .string_len(20)
                                .not_null()
                                .default("active"),
                        )
                        .col(
                            ColumnDef::new(ProductVariants::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductVariants::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_product_variants_product_id")
                                .from(ProductVariants::Table, ProductVariants::ProductId)
                                .to(Products::Table, Products::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_product_variants_sku")
                        .table(ProductVariants::Table)
                        .col(ProductVariants::Sku)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(InventoryMovements::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InventoryMovements::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryMovements::ProductVariantId)
                                .uuid()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InventoryMovements::Type).string_len(10).not_null())
                        .col(ColumnDef::new(InventoryMovements::Qty).integer().not_null())
                        .col(ColumnDef::new(InventoryMovements::Reason).string().null())
                        .col(ColumnDef::new(InventoryMovements::RefId).string().null())
                        .col(
                            ColumnDef::new(InventoryMovements::ResultingStock)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryMovements::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_inventory_movements_variant_id")
                                .from(
                                    InventoryMovements::Table,
                                    InventoryMovements::ProductVariantId,
                                )
                                .to(ProductVariants::Table, ProductVariants::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inventory_movements_variant_created")
                        .table(InventoryMovements::Table)
                        .col(InventoryMovements::ProductVariantId)
                        .col(InventoryMovements::CreatedAt)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(InventoryMovements::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ProductVariants::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Products {
        Table,
        Id,
    }

    #[derive(DeriveIden)]
    enum ProductVariants {
        Table,
        Id,
        ProductId,
        Sku,
        Price,
        Stock,
        MinStock,
        Status,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum InventoryMovements {
        Table,
        Id,
        ProductVariantId,
        Type,
        Qty,
        Reason,
        RefId,
        ResultingStock,
        CreatedAt,
    }
}

mod m20250101_000006_create_promotions_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000006_create_promotions_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(GiftCards::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(GiftCards::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(GiftCards::Code).string_len(32).not_null())
                        .col(
                            ColumnDef::new(GiftCards::InitialAmount)
                                .decimal_len(19, 4)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(GiftCards::RemainingAmount)
                                .decimal_len(19, 4)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(GiftCards::Currency)
                                .string_len(3)
                                .not_null()
                                .default("COP"),
                        )
                        .col(
                            ColumnDef::new(GiftCards::Status)
                                .string_len(20)
                                .not_null()
                                .default("active"),
                        )
                        .col(
                            ColumnDef::new(GiftCards::ExpirationDate)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(ColumnDef::new(GiftCards::PurchaserEmail).string().not_null())
                        .col(ColumnDef::new(GiftCards::RecipientEmail).string().null())
                        .col(ColumnDef::new(GiftCards::Message).text().null())
                        .col(ColumnDef::new(GiftCards::MarketplaceOrderId).string().null())
                        .col(
                            ColumnDef::new(GiftCards::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(GiftCards::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_gift_cards_code")
                        .table(GiftCards::Table)
                        .col(GiftCards::Code)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(GiftCardTransactions::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(GiftCardTransactions::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(GiftCardTransactions::GiftCardId).uuid().not_null())
                        .col(ColumnDef::new(GiftCardTransactions::OrderId).string().not_null())
                        .col(
                            ColumnDef::new(GiftCardTransactions::AmountUsed)
                                .decimal_len(19, 4)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(GiftCardTransactions::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_gift_card_transactions_card_id")
                                .from(GiftCardTransactions::Table, GiftCardTransactions::GiftCardId)
                                .to(GiftCards::Table, GiftCards::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Coupons::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Coupons::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Coupons::Code).string_len(64).not_null())
                        .col(ColumnDef::new(Coupons::Type).string_len(20).not_null())
                        .col(ColumnDef::new(Coupons::Value).decimal_len(19, 4).not_null())
                        .col(ColumnDef::new(Coupons::MinOrderAmount).decimal_len(19, 4).null())
                        .col(
                            ColumnDef::new(Coupons::MaxDiscountAmount)
                                .decimal_len(19, 4)
                                .null(),
                        )
                        .col(ColumnDef::new(Coupons::UsageLimitTotal).integer().null())
                        .col(ColumnDef::new(Coupons::UsageLimitPerUser).integer().null())
                        .col(
                            ColumnDef::new(Coupons::TimesUsed)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Coupons::StartDate)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Coupons::EndDate)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Coupons::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(ColumnDef::new(Coupons::Conditions).json().null())
                        .col(
                            ColumnDef::new(Coupons::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Coupons::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_coupons_code")
                        .table(Coupons::Table)
                        .col(Coupons::Code)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(CouponRedemptions::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(CouponRedemptions::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(CouponRedemptions::CouponId).uuid().not_null())
                        .col(ColumnDef::new(CouponRedemptions::UserId).uuid().null())
                        .col(ColumnDef::new(CouponRedemptions::UserEmail).string().null())
                        .col(ColumnDef::new(CouponRedemptions::OrderId).string().not_null())
                        .col(
                            ColumnDef::new(CouponRedemptions::AmountDiscounted)
                                .decimal_len(19, 4)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(CouponRedemptions::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_coupon_redemptions_coupon_id")
                                .from(CouponRedemptions::Table, CouponRedemptions::CouponId)
                                .to(Coupons::Table, Coupons::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_coupon_redemptions_coupon_id")
                        .table(CouponRedemptions::Table)
                        .col(CouponRedemptions::CouponId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(CouponRedemptions::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Coupons::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(GiftCardTransactions::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(GiftCards::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum GiftCards {
        Table,
        Id,
        Code,
        InitialAmount,
        RemainingAmount,
        Currency,
        Status,
        ExpirationDate,
        PurchaserEmail,
        RecipientEmail,
        Message,
        MarketplaceOrderId,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum GiftCardTransactions {
        Table,
        Id,
        GiftCardId,
        OrderId,
        AmountUsed,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum Coupons {
        Table,
        Id,
        Code,
        Type,
        Value,
        MinOrderAmount,
        MaxDiscountAmount,
        UsageLimitTotal,
        UsageLimitPerUser,
        TimesUsed,
        StartDate,
        EndDate,
        IsActive,
        Conditions,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum CouponRedemptions {
        Table,
        Id,
        CouponId,
        UserId,
        UserEmail,
        OrderId,
        AmountDiscounted,
        CreatedAt,
    }
}

mod m20250101_000007_create_user_maturity_scores_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000007_create_user_maturity_scores_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(UserMaturityScores::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(UserMaturityScores::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(UserMaturityScores::UserId).uuid().not_null())
                        .col(
                            ColumnDef::new(UserMaturityScores::IdeaValidation)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(UserMaturityScores::UserExperience)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(UserMaturityScores::MarketFit).integer().not_null())
                        .col(
                            ColumnDef::new(UserMaturityScores::Monetization)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(UserMaturityScores::ProfileData).json().null())
                        .col(
                            ColumnDef::new(UserMaturityScores::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_user_maturity_scores_user_created")
                        .table(UserMaturityScores::Table)
                        .col(UserMaturityScores::UserId)
                        .col(UserMaturityScores::CreatedAt)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(UserMaturityScores::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum UserMaturityScores {
        Table,
        Id,
        UserId,
        IdeaValidation,
        UserExperience,
        MarketFit,
        Monetization,
        ProfileData,
        CreatedAt,
    }
}
